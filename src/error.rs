// Copyright 2025 BoxLog Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use log::SetLoggerError;

/// Errors raised while installing a logging engine.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("failed to perform IO action: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to set up logger: {0}")]
    SetLogger(SetLoggerError),
    #[error("the process-wide engine is already installed")]
    AlreadyInitialized,
}

impl From<SetLoggerError> for SetupError {
    fn from(value: SetLoggerError) -> Self {
        SetupError::SetLogger(value)
    }
}
