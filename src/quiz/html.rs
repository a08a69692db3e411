//! Quiz HTML rendering
//!
//! The element shape, attribute names and class names (`quiz`, `quiz-button`,
//! `content hidden`) are what the bundled stylesheet and script select on.
//! Question, answer and content text are emitted raw.

use crate::quiz::parse::ParsedQuiz;

/// DOM id of one answer input
pub fn input_id(quiz_id: usize, index: usize) -> String {
    format!("quiz-{}-{}", quiz_id, index)
}

/// Render a parsed quiz as a self-contained HTML fragment
pub fn render(quiz: &ParsedQuiz<'_>, quiz_id: usize) -> String {
    let input_type = if quiz.is_multi_select() {
        "checkbox"
    } else {
        "radio"
    };

    let mut fieldset = String::new();
    for (index, answer) in quiz.answers.iter().enumerate() {
        let id = input_id(quiz_id, index);
        let correct = if answer.is_correct { " correct" } else { "" };
        fieldset.push_str(&format!(
            r#"<div><input type="{input_type}" name="answer" value="{index}" id="{id}"{correct}><label for="{id}">{text}</label></div>"#,
            text = answer.text,
        ));
    }

    format!(
        concat!(
            r#"<div class="quiz">"#,
            "<h3>{question}</h3>",
            "<form>",
            "<fieldset>{fieldset}</fieldset>",
            r#"<button type="submit" class="quiz-button">Submit</button>"#,
            "</form>",
            r#"<section class="content hidden">{content}</section>"#,
            "</div>"
        ),
        question = quiz.question,
        fieldset = fieldset,
        content = quiz.content(),
    )
}
