//! Worker thread owning the tokio runtime that performs outbound requests.

use std::thread;

use crossbeam_channel::{Receiver, Sender};
use registration_core::{HttpRegistrationEndpoint, RegistrationEndpoint, SubmissionResult};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    endpoint: HttpRegistrationEndpoint,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        tracing::info!(endpoint = %endpoint.endpoint_url(), "backend worker ready");
        let _ = ui_tx.try_send(UiEvent::Info("Listo".to_string()));

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Submit { input } => {
                        let result =
                            SubmissionResult::from_outcome(endpoint.register(&input).await);
                        // The form stays in `Submitting` until this arrives.
                        if ui_tx.send(UiEvent::SubmissionFinished(result)).is_err() {
                            tracing::warn!("ui event channel closed; dropping submission result");
                            return;
                        }
                    }
                }
            }
            tracing::debug!("backend command channel closed; worker exiting");
        });
    });
}
