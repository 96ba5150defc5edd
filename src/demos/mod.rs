//! Small worked demos of the builder APIs, mirroring the role the teacher
//! crate's own `src/examples` JSON walkthrough plays: not a guest language
//! the crate ships as a product, just doc-style exercises of the public
//! surface against the scenarios from the testable-properties section.

mod arithmetic;
mod json;
mod list_form;
