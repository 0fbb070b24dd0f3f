// One module per source kind. Each knows how to build a fresh pull-function
// over its source and, where it is cheap, how long it is.
mod derived;
mod indexed;
mod keyed;
mod nested;
mod range;
mod singleton;
mod text;

pub use derived::Derived;
pub use indexed::Indexed;
pub use keyed::Keyed;
pub use nested::Nested;
pub use range::Range;
pub use singleton::Singleton;
pub use text::Text;
