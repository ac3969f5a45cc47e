pub mod replay;
pub mod severities;
