use crate::error::ConfigError;

/// `message_data` entries are validated (must parse as a `{{ ... }}`
/// template expression) at startup; runtime rendering is out of the
/// sentinel's scope — see the "message_data templates" open question.
///
/// A template is well-formed if every `{{` has a matching `}}` and the
/// token inside is non-empty once trimmed.
pub fn validate_template(key: &str, template: &str) -> Result<(), ConfigError> {
    let mut search_start = 0usize;
    let mut found_any = false;

    loop {
        let Some(start) = template[search_start..].find("{{") else {
            break;
        };
        let abs_start = search_start + start;
        let Some(end) = template[abs_start..].find("}}") else {
            return Err(ConfigError::Validation {
                field: format!("message_data.{key}"),
                message: format!("unterminated template expression in '{template}'"),
            });
        };
        let abs_end = abs_start + end + 2;
        let inner = template[abs_start + 2..abs_end - 2].trim();
        if inner.is_empty() {
            return Err(ConfigError::Validation {
                field: format!("message_data.{key}"),
                message: format!("empty template expression in '{template}'"),
            });
        }
        found_any = true;
        search_start = abs_end;
    }

    if !found_any {
        return Err(ConfigError::Validation {
            field: format!("message_data.{key}"),
            message: format!("'{template}' does not contain a template expression"),
        });
    }

    Ok(())
}
