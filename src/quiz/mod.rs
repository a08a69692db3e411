//! Quiz module - turn inline quiz tags into interactive HTML
//!
//! Format:
//! <?quiz?>
//! question: Are you ready?
//! answer-correct: Yes!
//! answer: No!
//! content:
//! <h2>Shown once answered correctly</h2>
//! <?/quiz?>

pub mod api;
pub mod document;
pub mod extract;
pub mod html;
pub mod lint;
pub mod parse;
