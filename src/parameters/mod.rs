//! Parameters datasource generator (verb module)

mod builder;
mod parameter;

pub use builder::ParametersBuilder;
pub use parameter::{ListMember, Parameter, ParameterDomain, ParameterRange};
