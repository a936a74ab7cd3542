use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementKind {
    #[default]
    General,
    Assignment,
    Quiz,
    Exam,
}

impl AnnouncementKind {
    /// Everything except a general notice is due at some point.
    #[must_use]
    pub fn requires_deadline(self) -> bool {
        !matches!(self, Self::General)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Assignment => "assignment",
            Self::Quiz => "quiz",
            Self::Exam => "exam",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    #[serde(alias = "id")]
    pub announcement_id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "type", alias = "kind", default)]
    pub kind: AnnouncementKind,
    #[serde(default, with = "super::timestamp::lenient")]
    pub deadline: Option<OffsetDateTime>,
    #[serde(default, with = "super::timestamp::lenient")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub course_code: Option<String>,
    #[serde(default)]
    pub section_number: Option<i32>,
    #[serde(default)]
    pub author_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAnnouncement {
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: AnnouncementKind,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline: Option<OffsetDateTime>,
}

impl NewAnnouncement {
    /// Check the form before it is sent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a blank title or content, or a
    /// missing deadline on a kind that needs one.
    pub fn validate(&self) -> Result<(), Error> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation("Title is required".into()));
        }
        if self.content.trim().is_empty() {
            return Err(Error::Validation("Content is required".into()));
        }
        if self.kind.requires_deadline() && self.deadline.is_none() {
            return Err(Error::Validation(format!(
                "A deadline is required for {} announcements",
                self.kind.as_str()
            )));
        }
        Ok(())
    }
}

/// Partial edit of an existing announcement. `None` fields are left as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnouncementUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<AnnouncementKind>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline: Option<OffsetDateTime>,
}

impl AnnouncementUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.kind.is_none()
            && self.deadline.is_none()
    }

    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an empty update or a blank title.
    pub fn validate(&self) -> Result<(), Error> {
        if self.is_empty() {
            return Err(Error::Validation("Nothing to update".into()));
        }
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(Error::Validation("Title cannot be blank".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn draft(kind: AnnouncementKind) -> NewAnnouncement {
        NewAnnouncement {
            title: "Midterm".into(),
            content: "Chapters 1-4".into(),
            kind,
            deadline: None,
        }
    }

    #[test]
    fn general_needs_no_deadline() {
        assert!(draft(AnnouncementKind::General).validate().is_ok());
    }

    #[test]
    fn graded_kinds_need_deadline() {
        for kind in [AnnouncementKind::Assignment, AnnouncementKind::Quiz, AnnouncementKind::Exam] {
            let err = draft(kind).validate().unwrap_err();
            assert!(err.to_string().contains("deadline"), "{err}");

            let mut with_deadline = draft(kind);
            with_deadline.deadline = Some(datetime!(2026-11-01 09:00 UTC));
            assert!(with_deadline.validate().is_ok());
        }
    }

    #[test]
    fn exam_message_names_kind() {
        let err = draft(AnnouncementKind::Exam).validate().unwrap_err();
        assert_eq!(err.to_string(), "A deadline is required for exam announcements");
    }

    #[test]
    fn blank_title_rejected() {
        let mut a = draft(AnnouncementKind::General);
        a.title = "  ".into();
        assert!(a.validate().is_err());
    }

    #[test]
    fn announcement_reads_type_field() {
        let a: Announcement = serde_json::from_str(
            r#"{"id":5,"title":"Quiz 1","type":"quiz","deadline":"2026-10-20T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(a.announcement_id, 5);
        assert_eq!(a.kind, AnnouncementKind::Quiz);
        assert_eq!(a.deadline, Some(datetime!(2026-10-20 10:00 UTC)));
        assert!(a.content.is_empty());
    }

    #[test]
    fn update_serializes_only_changed_fields() {
        let update = AnnouncementUpdate {
            title: Some("New title".into()),
            ..AnnouncementUpdate::default()
        };
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"title":"New title"}"#);
        assert!(AnnouncementUpdate::default().validate().is_err());
    }
}
