//! Host stack abstraction
//!
//! The installer host passes every argument on a string stack and expects
//! the plugin to leave its answer on the same stack. The drivers only see
//! this trait, so they run the same way against the real host stack and
//! against [`VecStack`].

/// A last-in, first-out string stack owned by the host.
pub trait HostStack {
    /// Remove the top string, or `None` when the stack is empty.
    fn pop(&mut self) -> Option<String>;

    /// Put a string on top of the stack.
    fn push(&mut self, value: &str);

    /// Pop an argument, treating a missing one as the empty string.
    fn pop_arg(&mut self) -> String {
        self.pop().unwrap_or_default()
    }
}

/// In-memory stack, used by the console tool and the tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VecStack {
    // top of stack is the last element
    items: Vec<String>,
}

impl VecStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a stack whose first popped value is `args[0]`.
    pub fn with_args(args: &[impl AsRef<str>]) -> Self {
        Self {
            items: args.iter().rev().map(|a| a.as_ref().to_string()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl HostStack for VecStack {
    fn pop(&mut self) -> Option<String> {
        self.items.pop()
    }

    fn push(&mut self, value: &str) {
        self.items.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_args_pops_in_order() {
        let mut stack = VecStack::with_args(&["a.zip", "out"]);
        assert_eq!(stack.pop().as_deref(), Some("a.zip"));
        assert_eq!(stack.pop().as_deref(), Some("out"));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn test_pop_arg_on_empty_stack() {
        let mut stack = VecStack::new();
        assert_eq!(stack.pop_arg(), "");
        assert!(stack.is_empty());
    }

    #[test]
    fn test_push_goes_on_top() {
        let mut stack = VecStack::with_args(&["left"]);
        stack.push("success");
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.pop().as_deref(), Some("success"));
    }
}
