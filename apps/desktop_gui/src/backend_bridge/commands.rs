//! Backend commands queued from UI to the backend worker.

use client_core::ZipSaveMode;
use shared::{
    domain::{UserId, ZipCode},
    protocol::CredentialsRequest,
};

#[derive(Debug)]
pub enum BackendCommand {
    Register {
        credentials: CredentialsRequest,
    },
    Login {
        credentials: CredentialsRequest,
    },
    SaveZip {
        user_id: UserId,
        zip: ZipCode,
        mode: ZipSaveMode,
    },
    FetchForecast {
        zip: ZipCode,
    },
}
