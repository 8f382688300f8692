//! Behaviour tests for callscope-syntax.
