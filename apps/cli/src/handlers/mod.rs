pub mod jpa;
pub mod props;
