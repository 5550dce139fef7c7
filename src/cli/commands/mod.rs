pub(crate) mod add;
pub(crate) mod clear;
pub(crate) mod delete;
pub(crate) mod list;
pub(crate) mod seed;
pub(crate) mod show;
pub(crate) mod stats;
pub(crate) mod update;
