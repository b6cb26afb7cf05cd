//! The wording and fixed furniture of a memorandum.
//!
//! Everything a reader sees that does not come from the [`ReportData`](crate::ReportData)
//! lives in a [`Template`]: title format, labels, the introduction paragraph, closing
//! lines, footer small print and the style sheet. Templates are versioned and can be
//! loaded from JSON, so wording changes never touch layout code.
//!
//! Text fields may contain placeholders which are filled in at build time:
//!
//! | placeholder     | value                               |
//! |-----------------|-------------------------------------|
//! | `{seq}`         | sequence number, e.g. `003-2025`    |
//! | `{month}`       | month name, e.g. `Marzo`            |
//! | `{month_lower}` | month name in lower case            |
//! | `{year}`        | report year                         |
//! | `{page}`        | page number (footer only)           |
//! | `{pages}`       | total page count (footer only)      |

use crate::error::TemplateError;
use crate::style::StyleSheet;
use crate::units::{Mm, Pt};
use serde::{Deserialize, Serialize};

/// The template format version this crate reads and writes
pub const TEMPLATE_VERSION: u32 = 1;

/// The three memo layouts in use. There is deliberately no default: callers choose one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateVariant {
    /// No logo, DE/PARA labels, tagline footer
    Standard,
    /// Logo in the header, tagline plus banking reference and page numbers in the footer
    Letterhead,
    /// REMITENTE/DESTINATARIO labels, bulleted activity list
    Memorandum,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListMarker {
    Numbered,
    Bulleted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderTemplate {
    pub title_prefix: String,
    #[serde(default)]
    pub title_suffix: String,
    pub show_logo: bool,
    pub logo_width: Pt,
    pub logo_height: Pt,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentificationTemplate {
    pub from_label: String,
    pub to_label: String,
    pub subject_label: String,
    pub date_label: String,
    /// Distance from the left margin to the value column
    pub value_offset: Pt,
    pub subject: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityTemplate {
    pub marker: ListMarker,
    /// Indent of the marker and title from the left margin
    pub indent: Pt,
    /// Additional indent of the description block relative to the title
    pub description_indent: Pt,
    /// Vertical gap after each activity
    pub item_spacing: Pt,
    /// Printed instead of the list when the period has no activities
    pub empty_placeholder: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosingTemplate {
    pub closing_line: String,
    pub salutation: String,
    pub signature_width: Pt,
    pub signature_height: Pt,
    pub rule_width: Pt,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterTemplate {
    /// Small print lines, top to bottom, centred on every page
    pub lines: Vec<String>,
    /// Optional page label such as `Página {page} de {pages}`
    #[serde(default)]
    pub page_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub version: u32,
    pub variant: TemplateVariant,
    pub header: HeaderTemplate,
    pub identification: IdentificationTemplate,
    pub introduction: String,
    pub activities: ActivityTemplate,
    pub closing: ClosingTemplate,
    pub footer: FooterTemplate,
    #[serde(default = "StyleSheet::memo_default")]
    pub styles: StyleSheet,
}

const TAGLINE: &str = "Escuela Profesional de Odontología - Comité de Mejora Continua";
const INTRODUCTION: &str = "Es grato dirigirme a Usted, para informarle sobre las actividades \
realizadas en el mes de {month_lower} como practicante del Comité de Mejora Continua de la \
Escuela Profesional de Odontología:";

impl Template {
    /// The built-in wording for `variant`
    pub fn for_variant(variant: TemplateVariant) -> Template {
        let standard = Template {
            version: TEMPLATE_VERSION,
            variant,
            header: HeaderTemplate {
                title_prefix: "INFORME GENERAL Nº ".into(),
                title_suffix: "-EPO".into(),
                show_logo: false,
                logo_width: Mm(30.0).into(),
                logo_height: Mm(15.0).into(),
            },
            identification: IdentificationTemplate {
                from_label: "DE:".into(),
                to_label: "PARA:".into(),
                subject_label: "ASUNTO:".into(),
                date_label: "FECHA:".into(),
                value_offset: Mm(20.0).into(),
                subject: "Informe de Actividades — {month} {year}".into(),
            },
            introduction: INTRODUCTION.into(),
            activities: ActivityTemplate {
                marker: ListMarker::Numbered,
                indent: Mm(5.0).into(),
                description_indent: Mm(5.0).into(),
                item_spacing: Mm(3.0).into(),
                empty_placeholder: "No se registraron actividades en este período.".into(),
            },
            closing: ClosingTemplate {
                closing_line: "Es todo lo que informo para su conocimiento.".into(),
                salutation: "Atentamente,".into(),
                signature_width: Mm(50.0).into(),
                signature_height: Mm(15.0).into(),
                rule_width: Mm(60.0).into(),
            },
            footer: FooterTemplate {
                lines: vec![TAGLINE.into()],
                page_label: None,
            },
            styles: StyleSheet::memo_default(),
        };

        match variant {
            TemplateVariant::Standard => standard,
            TemplateVariant::Letterhead => Template {
                header: HeaderTemplate {
                    show_logo: true,
                    ..standard.header
                },
                footer: FooterTemplate {
                    lines: vec![
                        TAGLINE.into(),
                        "Depósitos: Banco de la Nación, Cta. Cte. Nº 00-068-000000".into(),
                    ],
                    page_label: Some("Página {page} de {pages}".into()),
                },
                ..standard
            },
            TemplateVariant::Memorandum => Template {
                header: HeaderTemplate {
                    title_prefix: "MEMORÁNDUM Nº ".into(),
                    title_suffix: String::new(),
                    ..standard.header
                },
                identification: IdentificationTemplate {
                    from_label: "REMITENTE:".into(),
                    to_label: "DESTINATARIO:".into(),
                    value_offset: Mm(32.0).into(),
                    ..standard.identification
                },
                activities: ActivityTemplate {
                    marker: ListMarker::Bulleted,
                    ..standard.activities
                },
                ..standard
            },
        }
    }

    /// Read a template from JSON, rejecting versions this crate does not understand
    pub fn from_json(json: &str) -> Result<Template, TemplateError> {
        let template: Template = serde_json::from_str(json)?;
        if template.version != TEMPLATE_VERSION {
            return Err(TemplateError::UnsupportedVersion {
                found: template.version,
                expected: TEMPLATE_VERSION,
            });
        }
        Ok(template)
    }

    pub fn to_json(&self) -> Result<String, TemplateError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl ListMarker {
    /// The marker printed before the activity at `index` (0-based)
    pub fn label(&self, index: usize) -> String {
        match self {
            ListMarker::Numbered => format!("{}.", index + 1),
            ListMarker::Bulleted => "•".to_string(),
        }
    }
}

/// Replace `{key}` placeholders in `text` with their values. Unknown placeholders are
/// left as they are.
pub fn interpolate(text: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(text.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{key}}}"), value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_differ_where_expected() {
        let standard = Template::for_variant(TemplateVariant::Standard);
        let letterhead = Template::for_variant(TemplateVariant::Letterhead);
        let memo = Template::for_variant(TemplateVariant::Memorandum);

        assert!(!standard.header.show_logo);
        assert!(letterhead.header.show_logo);
        assert_eq!(letterhead.footer.lines.len(), 2);
        assert!(letterhead.footer.page_label.is_some());
        assert_eq!(memo.identification.from_label, "REMITENTE:");
        assert_eq!(memo.activities.marker, ListMarker::Bulleted);
    }

    #[test]
    fn interpolation_fills_known_placeholders() {
        let text = interpolate(
            "Informe {seq} de {month} ({unknown})",
            &[("seq", "003-2025"), ("month", "Marzo")],
        );
        assert_eq!(text, "Informe 003-2025 de Marzo ({unknown})");
    }

    #[test]
    fn json_round_trip_keeps_wording() {
        let template = Template::for_variant(TemplateVariant::Letterhead);
        let json = template.to_json().expect("serializes");
        let read = Template::from_json(&json).expect("reads back");
        assert_eq!(read, template);
    }

    #[test]
    fn newer_template_versions_are_rejected() {
        let mut template = Template::for_variant(TemplateVariant::Standard);
        template.version = TEMPLATE_VERSION + 1;
        let json = serde_json::to_string(&template).expect("serializes");
        assert!(matches!(
            Template::from_json(&json),
            Err(TemplateError::UnsupportedVersion { found: 2, .. })
        ));
    }

    #[test]
    fn list_markers() {
        assert_eq!(ListMarker::Numbered.label(0), "1.");
        assert_eq!(ListMarker::Bulleted.label(7), "•");
    }
}
