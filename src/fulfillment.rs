//! Fulfillment envelope for the conversational-agent webhook contract.
//!
//! The calling platform expects every reply, success or failure, shaped as
//! `{"fulfillmentResponse": {"messages": [{"text": {"text": ["..."]}}]}}`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentReply {
    pub fulfillment_response: FulfillmentResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FulfillmentResponse {
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub text: TextMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextMessage {
    pub text: Vec<String>,
}

impl FulfillmentReply {
    fn single_message(text: String) -> Self {
        Self {
            fulfillment_response: FulfillmentResponse {
                messages: vec![Message {
                    text: TextMessage { text: vec![text] },
                }],
            },
        }
    }

    pub fn success(csv_url: &str) -> Self {
        Self::single_message(format!(
            "📦 Relatório gerado com sucesso!\n\n👉 [Clique aqui para baixar o CSV]({csv_url})"
        ))
    }

    pub fn error(description: &str) -> Self {
        Self::single_message(format!("❌ Erro ao gerar o relatório: {description}"))
    }
}
