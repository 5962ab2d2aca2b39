use std::sync::Arc;

use uuid::Uuid;

use crate::{ApplicationError, FetchTranscriptUseCase, TranscriptRequest, TranscriptResponse};

#[derive(Debug, Clone)]
pub struct FetchTranscriptCommand {
    id: Uuid,
    pub request: TranscriptRequest,
}

impl FetchTranscriptCommand {
    pub fn new(request: TranscriptRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            request,
        }
    }

    pub fn command_type(&self) -> &'static str {
        "fetch_transcript"
    }

    pub fn command_id(&self) -> Uuid {
        self.id
    }
}

pub struct FetchTranscriptCommandHandler {
    usecase: Arc<dyn FetchTranscriptUseCase>,
}

impl FetchTranscriptCommandHandler {
    pub fn new(usecase: Arc<dyn FetchTranscriptUseCase>) -> Self {
        Self { usecase }
    }

    pub async fn handle(
        &self,
        command: FetchTranscriptCommand,
    ) -> Result<TranscriptResponse, ApplicationError> {
        tracing::debug!(
            command_id = %command.command_id(),
            command_type = command.command_type(),
            "executing command"
        );

        self.usecase.fetch_transcript(command.request).await
    }
}
