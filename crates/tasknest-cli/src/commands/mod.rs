pub mod add;
pub mod category;
pub mod delete;
pub mod edit;
pub mod interactive;
pub mod list;
pub mod status;
pub mod transfer;
