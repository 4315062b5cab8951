#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User picked a file in the upload form.
    FileSelected(crate::SelectedFile),
    /// User cleared the file input.
    FileCleared,
    /// User submitted the upload form.
    UploadSubmitted,
    /// Upload endpoint answered 200 with the created jobs.
    UploadSucceeded(Vec<crate::Job>),
    /// Upload failed in transport or with a non-200 status.
    UploadFailed(String),
    /// Poll timer fired.
    PollTick,
    /// Results endpoint returned a batch.
    ResultsArrived(Vec<crate::JobResult>),
    /// Results request failed; the next tick retries.
    PollFailed(String),
    /// Dashboard is being torn down.
    Teardown,
    /// Fallback for placeholder wiring.
    NoOp,
}
