// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Notification capability injected into workflow updates.

/// Severity of a user-facing notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// Fire-and-forget sink for user-facing notices.
///
/// The UI backs this with the toast overlay; tests record the calls.
pub trait Notifier {
    fn notify(&mut self, kind: NoticeKind, message: String);

    fn notify_success(&mut self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(NoticeKind::Success, message.into());
    }

    fn notify_error(&mut self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(NoticeKind::Error, message.into());
    }

    fn notify_info(&mut self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(NoticeKind::Info, message.into());
    }
}

/// Notifier that keeps every notice in order, for assertions in tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub notices: Vec<(NoticeKind, String)>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn last(&self) -> Option<&(NoticeKind, String)> {
        self.notices.last()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&mut self, kind: NoticeKind, message: String) {
        self.notices.push((kind, message));
    }
}
