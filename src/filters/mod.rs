pub mod numeric;
pub mod scale;

pub use numeric::numeric_filter;
pub use scale::scale_filter;
