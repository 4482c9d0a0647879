//! Diagram declarations shipped with the CLI.

use strata::{
    DiagramSpec, Scope, StrataError,
    edge::Direction,
    kind::NodeKind::{Compute, Database, Queue, Service},
};

/// Title of the transactional outbox diagram; also the source of its file name.
pub const OUTBOX_TITLE: &str = "Transactional Outbox";

/// Spec of the transactional outbox diagram. It is rendered without being
/// opened in a viewer.
pub fn outbox_spec() -> DiagramSpec {
    DiagramSpec::new(OUTBOX_TITLE).show(false)
}

/// A service writes to its database; Kafka Connect reads the outbox table
/// from the same database and relays the changes to Kafka.
pub fn declare_outbox(diagram: &mut Scope<'_>) -> Result<(), StrataError> {
    let (service, database) = diagram.cluster("Microservice", |cluster| {
        Ok((cluster.node(Service)?, cluster.node(Database)?))
    })?;

    let connect = diagram.labeled(Compute, "Kafka Connect")?;

    let kafka = diagram.cluster("Kafka", |cluster| cluster.node(Queue))?;

    diagram.connect(&[service], &[database], Direction::Forward)?;
    diagram.connect(&[connect], &[database], Direction::Forward)?;
    diagram.connect(&[connect], &[kafka], Direction::Forward)
}
