use recap_core::Message;

/// Build the prompt for one direct summarization call.
pub fn summarization_prompt(text: &str, target_summary_size: usize) -> Vec<Message> {
    vec![
        Message::system(
            "You are a careful summarizer. You condense long passages while keeping \
             the narrative, the named people and places, and the important numbers.",
        ),
        Message::human(format!(
            "Summarize the following text in at most {target_summary_size} tokens. \
             Reply with the summary only.\n\nText:\n{text}"
        )),
    ]
}

/// Build the prompt that merges independently produced summaries.
pub fn synthesis_prompt(summaries: &[String]) -> Vec<Message> {
    let mut joined = String::new();
    for (i, summary) in summaries.iter().enumerate() {
        joined.push_str(&format!("Summary {}: {}\n\n", i + 1, summary));
    }

    vec![Message::human(format!(
        "A less capable model generated {} summaries of a document. Because of the \
         way they were produced, they may be uneven. Review them and synthesize them \
         into the single most detailed summary you can.\n\nThe summaries are as \
         follows: {}",
        summaries.len(),
        joined
    ))]
}
