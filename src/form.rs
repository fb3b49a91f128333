use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use uuid::Uuid;

/// Rows pre-populated per table when a form opens.
pub const MIN_COURSES: usize = 6;
/// Hard ceiling on rows per table; adds beyond this are rejected.
pub const MAX_COURSES: usize = 9;

pub const LEVEL_CHOICES: [&str; 4] = ["100", "200", "300", "400"];
pub const DEPARTMENT_CHOICES: [&str; 6] = [
    "Computer Science",
    "Cyber Security",
    "Software Engineering",
    "Microbiology",
    "Biochemistry",
    "Industrial Chemistry",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRole {
    Past,
    Current,
}

impl TableRole {
    pub fn parse(s: &str) -> Option<TableRole> {
        match s {
            "past" => Some(TableRole::Past),
            "current" => Some(TableRole::Current),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TableRole::Past => "past",
            TableRole::Current => "current",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseStatus {
    Registered,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Carried Over")]
    CarriedOver,
}

impl CourseStatus {
    pub fn parse(s: &str) -> Option<CourseStatus> {
        match s {
            "Registered" => Some(CourseStatus::Registered),
            "In Progress" => Some(CourseStatus::InProgress),
            "Carried Over" => Some(CourseStatus::CarriedOver),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CourseStatus::Registered => "Registered",
            CourseStatus::InProgress => "In Progress",
            CourseStatus::CarriedOver => "Carried Over",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PastRow {
    pub id: String,
    pub course: String,
    pub grade: String,
}

impl PastRow {
    fn blank() -> PastRow {
        PastRow {
            id: Uuid::new_v4().to_string(),
            course: String::new(),
            grade: String::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.course.is_empty() && !self.grade.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct CurrentRow {
    pub id: String,
    pub course: String,
    pub status: Option<CourseStatus>,
}

impl CurrentRow {
    fn blank() -> CurrentRow {
        CurrentRow {
            id: Uuid::new_v4().to_string(),
            course: String::new(),
            status: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.course.is_empty() && self.status.is_some()
    }
}

/// Record shapes carried in the serialized payloads. Field order matters:
/// `course` first, then the role-specific field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PastCourseRecord {
    pub course: String,
    pub grade: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentCourseRecord {
    pub course: String,
    pub status: CourseStatus,
}

#[derive(Debug, Clone, Default)]
pub struct BasicFields {
    pub level: String,
    pub cgpa: String,
    pub failed_courses: String,
    pub department: String,
}

/// The POST body handed to the (out-of-scope) server-side collaborator.
/// `past_courses`/`current_courses` are the encoded payload strings.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionForm {
    pub level: String,
    pub cgpa: String,
    pub failed_courses: String,
    pub department: String,
    pub past_courses: String,
    pub current_courses: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug)]
pub struct FormError {
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl FormError {
    fn capacity(role: TableRole) -> FormError {
        FormError {
            code: "capacity_exceeded",
            message: "Max courses reached".to_string(),
            details: Some(json!({
                "table": role.as_str(),
                "capacity": MAX_COURSES,
            })),
        }
    }

    fn row_not_found(role: TableRole, index: usize, len: usize) -> FormError {
        FormError {
            code: "not_found",
            message: "row not found".to_string(),
            details: Some(json!({
                "table": role.as_str(),
                "index": index,
                "rows": len,
            })),
        }
    }
}

/// In-memory model of one open form. Single source of truth: the
/// presentation layer renders from snapshots of this and never holds row
/// state of its own. Header rows are a rendering concern and do not exist
/// here.
pub struct FormSession {
    pub fields: BasicFields,
    pub past: Vec<PastRow>,
    pub current: Vec<CurrentRow>,
    sections: HashMap<String, bool>,
    pub past_courses_field: String,
    pub current_courses_field: String,
}

impl FormSession {
    /// Fresh form with `MIN_COURSES` empty rows per table and every
    /// section hidden. MIN_COURSES <= MAX_COURSES, so pre-population
    /// cannot trip the capacity check.
    pub fn open() -> FormSession {
        let mut past = Vec::with_capacity(MIN_COURSES);
        let mut current = Vec::with_capacity(MIN_COURSES);
        for _ in 0..MIN_COURSES {
            past.push(PastRow::blank());
            current.push(CurrentRow::blank());
        }
        FormSession {
            fields: BasicFields::default(),
            past,
            current,
            sections: HashMap::new(),
            past_courses_field: String::new(),
            current_courses_field: String::new(),
        }
    }

    pub fn row_count(&self, role: TableRole) -> usize {
        match role {
            TableRole::Past => self.past.len(),
            TableRole::Current => self.current.len(),
        }
    }

    /// Appends one empty row. The bound check runs before any row is
    /// constructed, so a rejected add is side-effect-free. Returns the new
    /// row's id and index as the render signal.
    pub fn add_row(&mut self, role: TableRole) -> Result<(String, usize), FormError> {
        if self.row_count(role) >= MAX_COURSES {
            return Err(FormError::capacity(role));
        }
        match role {
            TableRole::Past => {
                let row = PastRow::blank();
                let id = row.id.clone();
                self.past.push(row);
                Ok((id, self.past.len() - 1))
            }
            TableRole::Current => {
                let row = CurrentRow::blank();
                let id = row.id.clone();
                self.current.push(row);
                Ok((id, self.current.len() - 1))
            }
        }
    }

    pub fn remove_row(&mut self, role: TableRole, index: usize) -> Result<(), FormError> {
        let len = self.row_count(role);
        if index >= len {
            return Err(FormError::row_not_found(role, index, len));
        }
        match role {
            TableRole::Past => {
                self.past.remove(index);
            }
            TableRole::Current => {
                self.current.remove(index);
            }
        }
        Ok(())
    }

    pub fn update_past_row(
        &mut self,
        index: usize,
        course: Option<&str>,
        grade: Option<&str>,
    ) -> Result<(), FormError> {
        let len = self.past.len();
        let Some(row) = self.past.get_mut(index) else {
            return Err(FormError::row_not_found(TableRole::Past, index, len));
        };
        if let Some(c) = course {
            row.course = c.to_string();
        }
        if let Some(g) = grade {
            row.grade = g.to_string();
        }
        Ok(())
    }

    /// An empty status string clears the selection (the "Select" option);
    /// anything else must be one of the enumerated statuses.
    pub fn update_current_row(
        &mut self,
        index: usize,
        course: Option<&str>,
        status: Option<&str>,
    ) -> Result<(), FormError> {
        let parsed = match status {
            None => None,
            Some("") => Some(None),
            Some(s) => match CourseStatus::parse(s) {
                Some(v) => Some(Some(v)),
                None => {
                    return Err(FormError {
                        code: "bad_params",
                        message: "status must be one of: Registered, In Progress, Carried Over"
                            .to_string(),
                        details: Some(json!({ "status": s })),
                    });
                }
            },
        };

        let len = self.current.len();
        let Some(row) = self.current.get_mut(index) else {
            return Err(FormError::row_not_found(TableRole::Current, index, len));
        };
        if let Some(c) = course {
            row.course = c.to_string();
        }
        if let Some(s) = parsed {
            row.status = s;
        }
        Ok(())
    }

    /// Flips the named section and returns its new state. Sections start
    /// hidden and are independent of the data model.
    pub fn toggle_section(&mut self, section: &str) -> bool {
        let visible = self.sections.entry(section.to_string()).or_insert(false);
        *visible = !*visible;
        *visible
    }

    pub fn section_visible(&self, section: &str) -> bool {
        self.sections.get(section).copied().unwrap_or(false)
    }

    pub fn sections(&self) -> &HashMap<String, bool> {
        &self.sections
    }

    /// Complete past rows, in insertion order. Incomplete rows are dropped,
    /// not repaired or reported.
    pub fn extract_past(&self) -> Vec<PastCourseRecord> {
        self.past
            .iter()
            .filter(|r| r.is_complete())
            .map(|r| PastCourseRecord {
                course: r.course.clone(),
                grade: r.grade.clone(),
            })
            .collect()
    }

    pub fn extract_current(&self) -> Vec<CurrentCourseRecord> {
        self.current
            .iter()
            .filter(|r| !r.course.is_empty())
            .filter_map(|r| {
                r.status.map(|status| CurrentCourseRecord {
                    course: r.course.clone(),
                    status,
                })
            })
            .collect()
    }

    /// Explicit required-field check for the enumerated inputs. CGPA and
    /// failed-courses content are deliberately not inspected.
    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        if self.fields.level.is_empty() {
            violations.push(Violation {
                field: "level",
                code: "required",
                message: "level is required".to_string(),
            });
        } else if !LEVEL_CHOICES.contains(&self.fields.level.as_str()) {
            violations.push(Violation {
                field: "level",
                code: "invalid_choice",
                message: format!("level must be one of: {}", LEVEL_CHOICES.join(", ")),
            });
        }
        if self.fields.department.is_empty() {
            violations.push(Violation {
                field: "department",
                code: "required",
                message: "department is required".to_string(),
            });
        } else if !DEPARTMENT_CHOICES.contains(&self.fields.department.as_str()) {
            violations.push(Violation {
                field: "department",
                code: "invalid_choice",
                message: format!(
                    "department must be one of: {}",
                    DEPARTMENT_CHOICES.join(", ")
                ),
            });
        }
        violations
    }

    /// Encodes both payloads, writes them into the hidden carrier fields,
    /// and returns the full POST body. Read-only with respect to the row
    /// collections; empty tables encode as "[]" and never block submission.
    pub fn prepare_submission(&mut self) -> Result<SubmissionForm, FormError> {
        let encode_err = |e: serde_json::Error| FormError {
            code: "encode_failed",
            message: e.to_string(),
            details: None,
        };
        let past_json = serde_json::to_string(&self.extract_past()).map_err(encode_err)?;
        let current_json = serde_json::to_string(&self.extract_current()).map_err(encode_err)?;

        self.past_courses_field = past_json.clone();
        self.current_courses_field = current_json.clone();

        Ok(SubmissionForm {
            level: self.fields.level.clone(),
            cgpa: self.fields.cgpa.clone(),
            failed_courses: self.fields.failed_courses.clone(),
            department: self.fields.department.clone(),
            past_courses: past_json,
            current_courses: current_json,
        })
    }
}
