//! CLI command implementations

pub mod describe;
pub mod generate;
pub mod publish;

pub use describe::DescribeCommand;
pub use generate::GenerateCommand;
pub use publish::PublishCommand;
