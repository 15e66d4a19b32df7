pub mod entity;
pub mod vo;
