use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Document categories recognised by the classifier.
///
/// Declaration order matters: it is the order rules are evaluated in, and
/// the earliest type wins a tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Resume,
    BirthCert,
    Tin,
    Sss,
    Philhealth,
    Pagibig,
    Contract,
    MedicalClearance,
    Memo,
    IncidentReport,
    DisciplinaryAction,
    Commendation,
    ExitLetter,
    Interview,
    Clearance,
    /// Fallback when nothing matched or no text could be read.
    Others,
}

impl DocumentType {
    pub const ALL: [DocumentType; 16] = [
        DocumentType::Resume,
        DocumentType::BirthCert,
        DocumentType::Tin,
        DocumentType::Sss,
        DocumentType::Philhealth,
        DocumentType::Pagibig,
        DocumentType::Contract,
        DocumentType::MedicalClearance,
        DocumentType::Memo,
        DocumentType::IncidentReport,
        DocumentType::DisciplinaryAction,
        DocumentType::Commendation,
        DocumentType::ExitLetter,
        DocumentType::Interview,
        DocumentType::Clearance,
        DocumentType::Others,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resume => "resume",
            Self::BirthCert => "birth_cert",
            Self::Tin => "tin",
            Self::Sss => "sss",
            Self::Philhealth => "philhealth",
            Self::Pagibig => "pagibig",
            Self::Contract => "contract",
            Self::MedicalClearance => "medical_clearance",
            Self::Memo => "memo",
            Self::IncidentReport => "incident_report",
            Self::DisciplinaryAction => "disciplinary_action",
            Self::Commendation => "commendation",
            Self::ExitLetter => "exit_letter",
            Self::Interview => "interview",
            Self::Clearance => "clearance",
            Self::Others => "others",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown document type '{s}'"))
    }
}

/// How the text of an upload is obtained, decided by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Pdf,
    Docx,
    Image,
    Text,
    Unsupported,
}

impl FileKind {
    /// Map a lowercased extension (`".pdf"` or `"pdf"`) to a kind.
    pub fn from_extension(ext: &str) -> Self {
        match ext.trim_start_matches('.') {
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            "jpg" | "jpeg" | "png" => Self::Image,
            "txt" => Self::Text,
            _ => Self::Unsupported,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Image => "image",
            Self::Text => "text",
            Self::Unsupported => "unsupported",
        };
        f.write_str(s)
    }
}
