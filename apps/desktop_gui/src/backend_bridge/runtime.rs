//! Backend worker: a dedicated thread running a tokio runtime that owns the
//! HTTP client and processes UI commands one at a time.
//!
//! Commands are taken off the queue sequentially, so at most one request is
//! in flight; combined with the per-screen submit guards this gives the
//! app's ordering guarantee. There is no cancellation: a request already
//! sent runs to completion or failure even if the screen moves on.

use std::thread;

use client_core::ApiClient;
use crossbeam_channel::{Receiver, Sender};
use shared::protocol::SaveZipRequest;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(api_base_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Failure(UiError::new(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = ApiClient::new(&api_base_url);
            tracing::info!(base_url = client.base_url(), "backend worker ready");
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Register { credentials } => {
                        match client.register(&credentials).await {
                            Ok(user_id) => {
                                let _ = ui_tx.try_send(UiEvent::AuthOk { user_id, zip: None });
                            }
                            Err(err) => {
                                let _ = ui_tx.try_send(UiEvent::Failure(UiError::from_api_error(
                                    UiErrorContext::Register,
                                    &err,
                                )));
                            }
                        }
                    }
                    BackendCommand::Login { credentials } => {
                        match client.login(&credentials).await {
                            Ok(outcome) => {
                                let _ = ui_tx.try_send(UiEvent::AuthOk {
                                    user_id: outcome.user_id,
                                    zip: outcome.zip,
                                });
                            }
                            Err(err) => {
                                let _ = ui_tx.try_send(UiEvent::Failure(UiError::from_api_error(
                                    UiErrorContext::Login,
                                    &err,
                                )));
                            }
                        }
                    }
                    BackendCommand::SaveZip { user_id, zip, mode } => {
                        let request = SaveZipRequest {
                            zip: zip.clone(),
                            user_id,
                        };
                        match client.save_zip(&request, mode).await {
                            Ok(()) => {
                                let _ = ui_tx.try_send(UiEvent::ZipSaved { zip });
                            }
                            Err(err) => {
                                let _ = ui_tx.try_send(UiEvent::Failure(UiError::from_api_error(
                                    UiErrorContext::SaveZip,
                                    &err,
                                )));
                            }
                        }
                    }
                    BackendCommand::FetchForecast { zip } => {
                        match client.fetch_forecast(&zip).await {
                            Ok(forecast) => {
                                let _ = ui_tx.try_send(UiEvent::ForecastLoaded(forecast));
                            }
                            Err(err) => {
                                let _ = ui_tx.try_send(UiEvent::Failure(UiError::from_api_error(
                                    UiErrorContext::Forecast,
                                    &err,
                                )));
                            }
                        }
                    }
                }
            }
        });
    });
}
