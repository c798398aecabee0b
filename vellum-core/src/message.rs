//! Talk-page notification rendering

use vellum_api_types::UploadResult;

/// Section appended to the uploader's talk page when a deferred upload
/// finishes and `leavemessage` was requested.
pub fn upload_result_section(filename: &str, result: UploadResult, error: Option<&str>) -> String {
    match result {
        UploadResult::Success => format!(
            "== Upload of {name} finished ==\n\n\
             [[File:{name}]] was copied from its source URL and is now available.\n",
            name = filename
        ),
        UploadResult::Failed => format!(
            "== Upload of {name} failed ==\n\n\
             The copy upload of {name} did not complete: {reason}.\n",
            name = filename,
            reason = error.unwrap_or("unknown error")
        ),
        _ => format!(
            "== Upload of {name} stopped ==\n\n\
             The copy upload of {name} stopped on warnings and can be resumed \
             from its session key.\n",
            name = filename
        ),
    }
}
