use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex, MutexGuard, PoisonError,
};

use crate::{endpoint::ContactEndpoint, ContactFormFields, ContactSubmitter, SubmissionResult};

/// What the presentation layer should currently show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Sending,
    Failed(SubmissionResult),
    /// Terminal. The form stays in this state until it is recreated.
    Sent { id: Option<String> },
}

/// State of a contact form.
///
/// Only one submission can be in flight at a time. Once a message has been
/// sent the fields are cleared and further submissions are ignored.
#[derive(Debug)]
pub struct ContactForm<Endpoint> {
    submitter: ContactSubmitter<Endpoint>,
    fields: Mutex<ContactFormFields>,
    status: Mutex<FormStatus>,
    sending: AtomicBool,
}

impl<Endpoint> ContactForm<Endpoint>
where
    Endpoint: ContactEndpoint,
{
    pub fn new(submitter: ContactSubmitter<Endpoint>) -> Self {
        Self {
            submitter,
            fields: Default::default(),
            status: Mutex::new(FormStatus::Idle),
            sending: AtomicBool::new(false),
        }
    }

    pub fn fields(&self) -> ContactFormFields {
        lock(&self.fields).clone()
    }

    pub fn update_fields(&self, f: impl FnOnce(&mut ContactFormFields)) {
        f(&mut lock(&self.fields));
    }

    pub fn status(&self) -> FormStatus {
        lock(&self.status).clone()
    }

    pub fn is_sending(&self) -> bool {
        self.sending.load(Ordering::Acquire)
    }

    /// Submit the current field values.
    ///
    /// Returns `None` without doing anything if a submission is already in
    /// flight or the message has already been sent.
    pub async fn submit(&self) -> Option<SubmissionResult> {
        let _guard = SendingGuard::acquire(&self.sending, &self.status)?;

        let fields = self.fields();
        let result = self.submitter.submit(&fields).await;

        if result.ok {
            *lock(&self.fields) = ContactFormFields::default();
            self.set_status(FormStatus::Sent {
                id: result.id.clone(),
            });
        } else {
            self.set_status(FormStatus::Failed(result.clone()));
        }

        Some(result)
    }

    fn set_status(&self, status: FormStatus) {
        *lock(&self.status) = status;
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Holds the sending flag and clears it when dropped, so every exit path of
/// a submission releases the form. A submission that was cancelled before it
/// finished leaves the form `Idle`.
struct SendingGuard<'a> {
    flag: &'a AtomicBool,
    status: &'a Mutex<FormStatus>,
}

impl<'a> SendingGuard<'a> {
    /// Moves the form to `Sending`, unless a submission is in flight or the
    /// message was already sent. The status lock is held throughout, so a
    /// submission finishing concurrently is either fully visible or not at all.
    fn acquire(flag: &'a AtomicBool, status: &'a Mutex<FormStatus>) -> Option<Self> {
        let mut current = lock(status);
        if matches!(*current, FormStatus::Sent { .. }) {
            return None;
        }
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        *current = FormStatus::Sending;
        Some(Self { flag, status })
    }
}

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        let mut status = lock(self.status);
        if *status == FormStatus::Sending {
            *status = FormStatus::Idle;
        }
        drop(status);
        self.flag.store(false, Ordering::Release);
    }
}
