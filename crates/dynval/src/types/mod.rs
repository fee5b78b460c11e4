mod call;
mod child_reference;
mod component;
mod pointer;
mod surface;
mod value;

pub use call::FunctionCall;
pub use child_reference::ChildReference;
pub use component::{Accessibility, Check, Children, Component};
pub use pointer::JsonPointer;
pub use surface::Surface;
pub use value::DynamicValue;
