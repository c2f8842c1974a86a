// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Complai service.
//!
//! This crate provides the trait definitions, error types, and common types
//! shared across the workspace. Concrete collaborators (the OpenRouter client,
//! the PDF renderer, the history store) implement the traits defined here; the
//! orchestrator depends on nothing else.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ComplaiError;
pub use types::{
    AdapterType, ChatMessage, ComplaintResponse, ConversationId, ErrorKind, HealthStatus,
    OutputFormat, Role, UpstreamReply,
};

pub use traits::{ConversationStore, DocumentRenderer, PluginAdapter, UpstreamAdapter};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_variants_map_to_kinds() {
        let upstream = ComplaiError::Upstream {
            message: "client build failed".into(),
            source: None,
        };
        assert_eq!(upstream.kind(), ErrorKind::Upstream);
        assert_eq!(ComplaiError::render("bad font").kind(), ErrorKind::Internal);
        assert_eq!(ComplaiError::Config("x".into()).kind(), ErrorKind::Internal);
        assert_eq!(ComplaiError::Internal("x".into()).kind(), ErrorKind::Internal);
    }

    #[test]
    fn output_format_from_str_is_lenient_on_case_and_space() {
        assert_eq!(OutputFormat::from_str_opt(" PDF "), Some(OutputFormat::Pdf));
        assert_eq!(OutputFormat::from_str_opt("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str_opt("Auto"), Some(OutputFormat::Auto));
    }

    #[test]
    fn output_format_unknown_is_absent_not_auto() {
        assert_eq!(OutputFormat::from_str_opt("xml"), None);
        assert_eq!(OutputFormat::from_str_opt(""), None);
        assert_eq!(OutputFormat::from_str_opt("   "), None);
    }

    #[test]
    fn client_supported_formats() {
        assert!(OutputFormat::is_client_supported(Some(OutputFormat::Pdf)));
        assert!(OutputFormat::is_client_supported(Some(OutputFormat::Json)));
        assert!(OutputFormat::is_client_supported(Some(OutputFormat::Auto)));
        assert!(!OutputFormat::is_client_supported(None));
    }

    #[test]
    fn output_format_serializes_lowercase() {
        let json = serde_json::to_string(&OutputFormat::Pdf).unwrap();
        assert_eq!(json, "\"pdf\"");
        let parsed: OutputFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(parsed, OutputFormat::Json);
        assert_eq!(OutputFormat::Auto.to_string(), "auto");
    }

    #[test]
    fn error_kind_codes_are_stable() {
        let kinds = [
            ErrorKind::None,
            ErrorKind::Validation,
            ErrorKind::Refusal,
            ErrorKind::Upstream,
            ErrorKind::Timeout,
            ErrorKind::Internal,
        ];
        let codes: Vec<u8> = kinds.iter().map(|k| k.code()).collect();
        assert_eq!(codes, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(serde_json::to_string(&ErrorKind::Upstream).unwrap(), "3");
    }

    #[test]
    fn text_response_has_message_only() {
        let resp = ComplaintResponse::text("hello");
        assert!(resp.is_success());
        assert_eq!(resp.message(), Some("hello"));
        assert!(resp.document_bytes().is_none());
        assert!(resp.error().is_none());
        assert_eq!(resp.error_kind(), ErrorKind::None);
    }

    #[test]
    fn document_response_has_bytes_only() {
        let resp = ComplaintResponse::document(b"%PDF-1.4".to_vec());
        assert!(resp.is_success());
        assert!(resp.message().is_none());
        assert_eq!(resp.document_bytes(), Some(&b"%PDF-1.4"[..]));
    }

    #[test]
    fn failure_never_carries_none_kind() {
        let resp = ComplaintResponse::failure(ErrorKind::None, "oops");
        assert!(!resp.is_success());
        assert_eq!(resp.error_kind(), ErrorKind::Internal);
        assert!(resp.document_bytes().is_none());
    }

    #[test]
    fn only_refusal_failures_carry_a_message() {
        let upstream = ComplaintResponse::failure(ErrorKind::Upstream, "bad gateway");
        assert!(upstream.message().is_none());

        let refusal = ComplaintResponse::refusal("out of scope", "I can't help with that.");
        assert_eq!(refusal.error_kind(), ErrorKind::Refusal);
        assert_eq!(refusal.message(), Some("I can't help with that."));
        assert!(refusal.document_bytes().is_none());
    }

    #[test]
    fn conversation_id_ignores_blank_input() {
        assert_eq!(ConversationId::from_client(Some("  ")), None);
        assert_eq!(ConversationId::from_client(None), None);
        assert_eq!(
            ConversationId::from_client(Some(" abc ")),
            Some(ConversationId("abc".into()))
        );
    }

    #[test]
    fn upstream_reply_helpers_ignore_blank_fields() {
        let reply = UpstreamReply {
            text: Some("  ".into()),
            status_code: Some(200),
            error: Some("".into()),
        };
        assert!(reply.non_blank_text().is_none());
        assert!(reply.error_message().is_none());
    }

    #[test]
    fn all_trait_modules_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_upstream_adapter<T: UpstreamAdapter>() {}
        fn _assert_document_renderer<T: DocumentRenderer>() {}
        fn _assert_conversation_store<T: ConversationStore>() {}
    }
}
