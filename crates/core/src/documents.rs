//! Document metadata helpers: storage path construction, filename
//! sanitization, search matching, and MIME categorization.

/// How far back an upload counts as "recent" in the statistics.
pub const RECENT_UPLOAD_WINDOW_DAYS: i64 = 30;

/// Replace every character outside `[A-Za-z0-9._-]` with `_`.
///
/// Keeps stored blob names safe for filesystems and URLs while staying
/// recognizable. Umlauts and spaces are flattened rather than transliterated.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Build the blob storage path for an upload:
/// `documents/{user_id}/{project_id?}/{timestamp}_{sanitized_filename}`.
///
/// The project segment is omitted entirely when the upload is not tied to
/// a project.
pub fn build_storage_path(
    user_id: &str,
    project_id: Option<&str>,
    timestamp_millis: i64,
    filename: &str,
) -> String {
    let name = sanitize_filename(filename);
    match project_id {
        Some(project) => format!("documents/{user_id}/{project}/{timestamp_millis}_{name}"),
        None => format!("documents/{user_id}/{timestamp_millis}_{name}"),
    }
}

/// Suggested upload folder derived from the file extension.
pub fn suggested_folder(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" | "doc" | "docx" | "odt" | "txt" | "rtf" => "Dokumente",
        "jpg" | "jpeg" | "png" | "gif" | "webp" | "heic" => "Bilder",
        "dwg" | "dxf" | "ifc" | "svg" => "Pläne",
        "xls" | "xlsx" | "ods" | "csv" => "Tabellen",
        _ => "Sonstiges",
    }
}

/// Case-insensitive substring match on filename, description, or any tag.
pub fn matches_search(
    term: &str,
    filename: &str,
    beschreibung: Option<&str>,
    tags: &[String],
) -> bool {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return false;
    }

    filename.to_lowercase().contains(&needle)
        || beschreibung
            .map(|b| b.to_lowercase().contains(&needle))
            .unwrap_or(false)
        || tags.iter().any(|t| t.to_lowercase().contains(&needle))
}

/// Top-level MIME category, e.g. `application/pdf` -> `application`.
pub fn mime_category(mime: &str) -> &str {
    mime.split('/').next().unwrap_or(mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_safe_characters() {
        assert_eq!(sanitize_filename("Plan_EG-v2.pdf"), "Plan_EG-v2.pdf");
    }

    #[test]
    fn sanitize_replaces_spaces_and_umlauts() {
        // The precomposed `ü` is a single char and maps to a single `_`.
        assert_eq!(
            sanitize_filename("Grundriss Küche (final).pdf"),
            "Grundriss_K_che__final_.pdf"
        );
    }

    #[test]
    fn storage_path_with_project() {
        assert_eq!(
            build_storage_path("u1", Some("p7"), 1700000000000, "a b.pdf"),
            "documents/u1/p7/1700000000000_a_b.pdf"
        );
    }

    #[test]
    fn storage_path_without_project_omits_segment() {
        assert_eq!(
            build_storage_path("u1", None, 42, "plan.dwg"),
            "documents/u1/42_plan.dwg"
        );
    }

    #[test]
    fn suggested_folder_follows_extension_map() {
        assert_eq!(suggested_folder("angebot.PDF"), "Dokumente");
        assert_eq!(suggested_folder("baustelle.jpeg"), "Bilder");
        assert_eq!(suggested_folder("grundriss.dwg"), "Pläne");
        assert_eq!(suggested_folder("kosten.xlsx"), "Tabellen");
        assert_eq!(suggested_folder("video.mp4"), "Sonstiges");
        assert_eq!(suggested_folder("ohne_endung"), "Sonstiges");
    }

    #[test]
    fn search_is_case_insensitive() {
        assert!(matches_search("PLAN", "grundriss-plan.pdf", None, &[]));
        assert!(matches_search("plan", "GRUNDRISS-PLAN.PDF", None, &[]));
    }

    #[test]
    fn search_matches_description_and_tags() {
        assert!(matches_search(
            "angebot",
            "datei.pdf",
            Some("Angebot Rohbau"),
            &[]
        ));
        assert!(matches_search(
            "rohbau",
            "datei.pdf",
            None,
            &["Rohbau".to_string(), "2026".to_string()]
        ));
    }

    #[test]
    fn search_rejects_non_matches_and_empty_term() {
        assert!(!matches_search("dach", "datei.pdf", Some("Rohbau"), &[]));
        assert!(!matches_search("", "datei.pdf", None, &[]));
    }

    #[test]
    fn mime_category_is_top_level_segment() {
        assert_eq!(mime_category("application/pdf"), "application");
        assert_eq!(mime_category("image/png"), "image");
        assert_eq!(mime_category("weird"), "weird");
    }
}
