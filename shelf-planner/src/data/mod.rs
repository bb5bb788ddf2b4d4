pub(crate) mod rule;
pub(crate) mod transaction;

pub use self::{
    rule::{Itemset, Rule},
    transaction::Transaction,
};
