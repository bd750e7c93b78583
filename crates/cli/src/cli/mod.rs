pub mod args;
pub mod op;
pub mod ops;

#[cfg(test)]
pub(crate) mod testkit;

pub use ops::{Billing, Catalog, Config, Data, Init, Job, Keys, Project, Ui, User, Version};
