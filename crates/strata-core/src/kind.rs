//! Infrastructure categories a node can depict.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// The kind of infrastructure element a node stands for.
///
/// The names match external configuration strings (snake_case).
///
/// # Variants
///
/// - `Service` - An application service (drawn as Spring)
/// - `Database` - A relational database (drawn as PostgreSQL)
/// - `Queue` - A message broker or queue (drawn as Kafka)
/// - `Compute` - A generic compute host (drawn as a server)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Service,
    Database,
    Queue,
    Compute,
}

impl NodeKind {
    /// Label used when a node is declared without one.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_core::kind::NodeKind;
    ///
    /// assert_eq!(NodeKind::Database.default_label(), "PostgreSQL");
    /// ```
    pub fn default_label(self) -> &'static str {
        match self {
            Self::Service => "Spring",
            Self::Database => "PostgreSQL",
            Self::Queue => "Kafka",
            Self::Compute => "Server",
        }
    }

    /// Icon location relative to an icon directory, laid out as
    /// `<provider>/<category>/<name>.png`.
    pub fn icon_path(self) -> &'static str {
        match self {
            Self::Service => "programming/framework/spring.png",
            Self::Database => "onprem/database/postgresql.png",
            Self::Queue => "onprem/queue/kafka.png",
            Self::Compute => "onprem/compute/server.png",
        }
    }
}

impl FromStr for NodeKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "service" => Ok(Self::Service),
            "database" => Ok(Self::Database),
            "queue" => Ok(Self::Queue),
            "compute" => Ok(Self::Compute),
            _ => Err("Unsupported node kind"),
        }
    }
}

impl From<NodeKind> for &'static str {
    fn from(val: NodeKind) -> Self {
        match val {
            NodeKind::Service => "service",
            NodeKind::Database => "database",
            NodeKind::Queue => "queue",
            NodeKind::Compute => "compute",
        }
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}
