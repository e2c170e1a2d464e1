use std::fmt;
use std::rc::Rc;

use crate::extend::value::Value;

type Callable = dyn Fn(&[Value]) -> Value;

/// Callable value. Merges copy it by reference like any other scalar.
#[derive(Clone)]
pub struct FunctionValue {
    name: Rc<str>,
    callable: Rc<Callable>,
}

impl FunctionValue {
    pub fn new<F>(name: impl Into<String>, callable: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Self {
            name: Rc::from(name.into()),
            callable: Rc::new(callable),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.callable)(args)
    }

    pub fn ptr_eq(&self, other: &FunctionValue) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.callable), Rc::as_ptr(&other.callable))
    }
}

impl PartialEq for FunctionValue {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            f.write_str("[Function (anonymous)]")
        } else {
            write!(f, "[Function: {}]", self.name)
        }
    }
}
