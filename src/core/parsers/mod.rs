pub mod dts;
pub mod tsconfig;
