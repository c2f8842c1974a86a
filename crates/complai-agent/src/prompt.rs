// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builds the conversation sent upstream for each operation.

use complai_core::{ChatMessage, OutputFormat};

/// Assembles system, history, and user turns for the upstream model.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    municipality: String,
}

impl PromptBuilder {
    pub fn new(municipality: impl Into<String>) -> Self {
        Self {
            municipality: municipality.into(),
        }
    }

    /// Conversation for a free-form question.
    pub fn ask(&self, history: Vec<ChatMessage>, question: &str) -> Vec<ChatMessage> {
        let user = format!(
            "User question about {m}:\n{question}\n\n\
             Please answer concisely and provide relevant local information or guidance.",
            m = self.municipality,
        );
        self.assemble(history, user)
    }

    /// Conversation for drafting a complaint letter.
    ///
    /// The model is told to open with a one-line JSON header declaring the
    /// output format so the reply can be routed to the renderer.
    pub fn redact(
        &self,
        history: Vec<ChatMessage>,
        complaint: &str,
        requested: OutputFormat,
    ) -> Vec<ChatMessage> {
        let format_hint = match requested {
            OutputFormat::Pdf => "The caller requested a PDF document, so declare \"pdf\".".to_string(),
            OutputFormat::Json => "The caller requested plain text, so declare \"json\".".to_string(),
            OutputFormat::Auto => {
                "The caller has no preference: declare \"pdf\" for a formal letter, otherwise \"json\"."
                    .to_string()
            }
        };
        let user = format!(
            "Please redact a formal, civil, and concise letter addressed to the City Hall \
             (Ajuntament) of {m} based on the following complaint. Include a short summary, \
             the specific request or remedy sought, and a polite closing.\n\n\
             Start your reply with a single line containing only a JSON object of the form \
             {{\"format\":\"pdf\"}}, {{\"format\":\"json\"}} or {{\"format\":\"auto\"}}, then a blank \
             line, then the letter. {format_hint}\n\n\
             Complaint text:\n{complaint}",
            m = self.municipality,
        );
        self.assemble(history, user)
    }

    fn system_message(&self) -> ChatMessage {
        ChatMessage::system(format!(
            "You are Complai, an assistant for residents of {m}. You answer questions about \
             {m} and help draft complaints addressed to its City Hall. If a request is not \
             about {m}, reply that you can only help with matters related to {m}.",
            m = self.municipality,
        ))
    }

    fn assemble(&self, history: Vec<ChatMessage>, user: String) -> Vec<ChatMessage> {
        let mut conversation = Vec::with_capacity(history.len() + 2);
        conversation.push(self.system_message());
        conversation.extend(history);
        conversation.push(ChatMessage::user(user));
        conversation
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new("El Prat de Llobregat")
    }
}
