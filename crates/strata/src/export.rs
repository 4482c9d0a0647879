//! Conversion of declared graphs into formats external tools consume.

pub mod dot;
