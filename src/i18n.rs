pub use rust_i18n::t;
