mod array_value;
mod function_value;
mod object_value;
mod value;

pub use array_value::ArrayValue;
pub use function_value::FunctionValue;
pub use object_value::ObjectValue;
pub use value::Value;
