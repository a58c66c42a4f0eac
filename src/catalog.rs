use crate::api::ImageRecord;

/// Compute the displayed list: positions into `catalog` whose records
/// match `query`, in catalog order. An empty or whitespace-only query is
/// the identity filter. Positions are only meaningful against the exact
/// catalog slice they were computed from.
pub fn filter_catalog(catalog: &[ImageRecord], query: &str) -> Vec<usize> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return (0..catalog.len()).collect();
    }
    catalog
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_needle(record, &needle))
        .map(|(position, _)| position)
        .collect()
}

/// Case-insensitive substring match against path, hash, camera make and
/// model, and date taken. Absent optional fields never match.
fn matches_needle(record: &ImageRecord, needle: &str) -> bool {
    let optional_contains = |field: &Option<String>| {
        field
            .as_deref()
            .is_some_and(|value| value.to_lowercase().contains(needle))
    };

    record.file_path.to_lowercase().contains(needle)
        || record.file_hash.to_lowercase().contains(needle)
        || optional_contains(&record.camera_make)
        || optional_contains(&record.camera_model)
        || optional_contains(&record.date_taken)
}

/// Last path segment of `path`, for card titles.
pub fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// First 12 characters of the content hash, for card subtitles. Hashes
/// shorter than that are shown whole.
pub fn hash_preview(hash: &str) -> &str {
    hash.get(..12).unwrap_or(hash)
}

/// Combined camera line, or `None` when the record carries neither make
/// nor model (the card omits the line entirely).
pub fn camera_label(record: &ImageRecord) -> Option<String> {
    match (&record.camera_make, &record.camera_model) {
        (Some(make), Some(model)) => Some(format!("{} {}", make, model)),
        (Some(make), None) => Some(make.clone()),
        (None, Some(model)) => Some(model.clone()),
        (None, None) => None,
    }
}

/// GPS line, present only when the record has coordinates.
pub fn gps_label(record: &ImageRecord) -> Option<String> {
    match (record.gps_latitude, record.gps_longitude) {
        (Some(lat), Some(lon)) => Some(format!("{:.5}, {:.5}", lat, lon)),
        _ => None,
    }
}
