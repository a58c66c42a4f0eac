use crate::api::{DeleteMode, ImageRecord};
use crate::catalog::filter_catalog;

/// Something that happened: a user gesture or a finished background call.
/// The UI and the network layer both funnel into this one set.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    SearchChanged(String),
    RefreshRequested,
    CatalogLoaded(Vec<ImageRecord>),
    CatalogFailed(String),
    OpenLightbox(usize),
    CloseLightbox,
    NextImage,
    PrevImage,
    OpenMenu { hash: String, extra_count: usize },
    ChooseMode(DeleteMode),
    ConfirmDelete,
    DeclineDelete,
    DismissMenu,
    DeleteSucceeded(String),
    DeleteFailed(String),
    OpenStatusPanel,
    CloseStatusPanel,
    StatusLoaded(u64),
    StatusFailed(String),
}

/// Work the reducer wants started. The app owns the threads and channels;
/// the reducer itself never blocks and never touches the network.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchCatalog,
    FetchFullImage { hash: String },
    DeleteDuplicates { hash: String, mode: DeleteMode },
    FetchStatus,
}

/// Whether we have a catalog to show at all. `Failed` is only entered
/// when there is no previous catalog to fall back on.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogPhase {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuStage {
    Choosing,
    Confirming(DeleteMode),
}

/// The duplicate-resolution menu. At most one exists at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveMenu {
    pub hash: String,
    /// Number of duplicate copies beyond the indexed one.
    pub extra_count: usize,
    pub stage: MenuStage,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusPanel {
    Loading,
    Ready(u64),
    Failed(String),
}

/// Everything the gallery knows, in one place. Views read it; the
/// reducer in [`GalleryState::apply`] is the only writer.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryState {
    /// Source of truth: the records from the most recent catalog fetch.
    pub catalog: Vec<ImageRecord>,
    /// Positions into `catalog` that survive the current query, in
    /// catalog order. Rebuilt whenever either input changes.
    pub displayed: Vec<usize>,
    pub query: String,
    pub phase: CatalogPhase,
    /// A refresh failed while a catalog was already on screen. Shown
    /// instead of the cards until the next gesture clears it.
    pub last_error: Option<String>,
    /// A catalog fetch is in flight. The old list stays visible.
    pub refreshing: bool,
    /// Cursor into `displayed` while the lightbox is open.
    pub lightbox: Option<usize>,
    pub menu: Option<ResolveMenu>,
    pub status_panel: Option<StatusPanel>,
    /// Outcome of the most recent operation, shown in the footer.
    pub status_line: String,
}

impl GalleryState {
    pub fn new() -> Self {
        Self {
            catalog: Vec::new(),
            displayed: Vec::new(),
            query: String::new(),
            phase: CatalogPhase::Loading,
            last_error: None,
            refreshing: false,
            lightbox: None,
            menu: None,
            status_panel: None,
            status_line: String::new(),
        }
    }

    /// The record under the lightbox cursor, if the lightbox is open.
    pub fn lightbox_record(&self) -> Option<&ImageRecord> {
        let cursor = self.lightbox?;
        let position = *self.displayed.get(cursor)?;
        self.catalog.get(position)
    }

    /// Apply one event and return the background work it calls for.
    pub fn apply(&mut self, event: AppEvent) -> Vec<Effect> {
        // An unanswered confirmation blocks everything except its own
        // answer. Background results still land.
        let confirming = matches!(
            self.menu.as_ref().map(|menu| menu.stage),
            Some(MenuStage::Confirming(_))
        );
        if confirming {
            match event {
                AppEvent::ConfirmDelete => return self.confirm_delete(),
                AppEvent::DeclineDelete => return self.decline_delete(),
                AppEvent::CatalogLoaded(_)
                | AppEvent::CatalogFailed(_)
                | AppEvent::DeleteSucceeded(_)
                | AppEvent::DeleteFailed(_)
                | AppEvent::StatusLoaded(_)
                | AppEvent::StatusFailed(_) => {}
                _ => return Vec::new(),
            }
        }

        match event {
            AppEvent::SearchChanged(query) => {
                self.query = query;
                self.last_error = None;
                self.rebuild_displayed()
            }
            AppEvent::RefreshRequested => {
                self.refreshing = true;
                self.last_error = None;
                vec![Effect::FetchCatalog]
            }
            AppEvent::CatalogLoaded(catalog) => {
                self.catalog = catalog;
                self.phase = CatalogPhase::Ready;
                self.refreshing = false;
                self.last_error = None;
                self.rebuild_displayed()
            }
            AppEvent::CatalogFailed(message) => {
                self.refreshing = false;
                if self.catalog.is_empty() {
                    self.phase = CatalogPhase::Failed(message);
                } else {
                    // The cache is kept but not shown; the next gesture
                    // brings the cards back.
                    self.last_error = Some(message);
                }
                Vec::new()
            }
            AppEvent::OpenLightbox(position) => {
                if position >= self.displayed.len() {
                    return Vec::new();
                }
                self.lightbox = Some(position);
                vec![self.fetch_under_cursor(position)]
            }
            AppEvent::CloseLightbox => {
                self.lightbox = None;
                Vec::new()
            }
            AppEvent::NextImage => self.step_lightbox(1),
            AppEvent::PrevImage => self.step_lightbox(-1),
            AppEvent::OpenMenu { hash, extra_count } => {
                // One menu at a time: a new one replaces whatever was open.
                if extra_count > 0 {
                    self.menu = Some(ResolveMenu {
                        hash,
                        extra_count,
                        stage: MenuStage::Choosing,
                    });
                }
                Vec::new()
            }
            AppEvent::ChooseMode(mode) => self.choose_mode(mode),
            AppEvent::ConfirmDelete => self.confirm_delete(),
            AppEvent::DeclineDelete => self.decline_delete(),
            AppEvent::DismissMenu => {
                self.menu = None;
                Vec::new()
            }
            AppEvent::DeleteSucceeded(message) => {
                self.status_line = message;
                self.refreshing = true;
                vec![Effect::FetchCatalog]
            }
            AppEvent::DeleteFailed(error) => {
                self.status_line = error;
                Vec::new()
            }
            AppEvent::OpenStatusPanel => {
                self.status_panel = Some(StatusPanel::Loading);
                vec![Effect::FetchStatus]
            }
            AppEvent::CloseStatusPanel => {
                self.status_panel = None;
                Vec::new()
            }
            AppEvent::StatusLoaded(total) => {
                if self.status_panel.is_some() {
                    self.status_panel = Some(StatusPanel::Ready(total));
                }
                Vec::new()
            }
            AppEvent::StatusFailed(error) => {
                if self.status_panel.is_some() {
                    self.status_panel = Some(StatusPanel::Failed(error));
                }
                Vec::new()
            }
        }
    }

    fn choose_mode(&mut self, mode: DeleteMode) -> Vec<Effect> {
        if let Some(menu) = &mut self.menu {
            if menu.stage == MenuStage::Choosing {
                menu.stage = MenuStage::Confirming(mode);
            }
        }
        Vec::new()
    }

    /// The confirmation was answered yes. Nothing was sent before this
    /// point; exactly one delete request leaves here.
    fn confirm_delete(&mut self) -> Vec<Effect> {
        let Some(menu) = self.menu.take() else {
            return Vec::new();
        };
        match menu.stage {
            MenuStage::Confirming(mode) => {
                self.status_line = "Deleting duplicates...".to_string();
                vec![Effect::DeleteDuplicates {
                    hash: menu.hash,
                    mode,
                }]
            }
            MenuStage::Choosing => {
                // No dialog was showing; put the menu back untouched.
                self.menu = Some(menu);
                Vec::new()
            }
        }
    }

    /// Answered no: nothing is sent and the whole menu closes.
    fn decline_delete(&mut self) -> Vec<Effect> {
        if matches!(
            self.menu.as_ref().map(|menu| menu.stage),
            Some(MenuStage::Confirming(_))
        ) {
            self.menu = None;
        }
        Vec::new()
    }

    fn rebuild_displayed(&mut self) -> Vec<Effect> {
        self.displayed = filter_catalog(&self.catalog, &self.query);
        self.clamp_lightbox()
    }

    /// After the displayed list changed under an open lightbox: keep the
    /// cursor in bounds, or close if nothing is left to show. The record
    /// under the cursor may have changed, so re-request its image.
    fn clamp_lightbox(&mut self) -> Vec<Effect> {
        let Some(cursor) = self.lightbox else {
            return Vec::new();
        };
        if self.displayed.is_empty() {
            self.lightbox = None;
            return Vec::new();
        }
        let clamped = cursor.min(self.displayed.len() - 1);
        self.lightbox = Some(clamped);
        vec![self.fetch_under_cursor(clamped)]
    }

    fn step_lightbox(&mut self, delta: isize) -> Vec<Effect> {
        let Some(cursor) = self.lightbox else {
            return Vec::new();
        };
        let len = self.displayed.len();
        if len == 0 {
            self.lightbox = None;
            return Vec::new();
        }
        let next = (cursor as isize + delta).rem_euclid(len as isize) as usize;
        self.lightbox = Some(next);
        vec![self.fetch_under_cursor(next)]
    }

    fn fetch_under_cursor(&self, cursor: usize) -> Effect {
        let record = &self.catalog[self.displayed[cursor]];
        Effect::FetchFullImage {
            hash: record.file_hash.clone(),
        }
    }
}

impl Default for GalleryState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str, hash: &str) -> ImageRecord {
        ImageRecord {
            file_path: path.to_string(),
            file_hash: hash.to_string(),
            width: 100,
            height: 100,
            camera_make: None,
            camera_model: None,
            date_taken: None,
            gps_latitude: None,
            gps_longitude: None,
            duplicate_paths: Vec::new(),
        }
    }

    fn loaded_state(records: Vec<ImageRecord>) -> GalleryState {
        let mut state = GalleryState::new();
        let effects = state.apply(AppEvent::CatalogLoaded(records));
        assert!(effects.is_empty());
        state
    }

    fn three_records() -> Vec<ImageRecord> {
        let mut second = record("/p/b.jpg", "hash-b");
        second.camera_make = Some("Nikon".to_string());
        vec![record("/p/a.jpg", "hash-a"), second, record("/p/c.jpg", "hash-c")]
    }

    #[test]
    fn refresh_emits_fetch_and_marks_in_flight() {
        let mut state = GalleryState::new();
        let effects = state.apply(AppEvent::RefreshRequested);
        assert_eq!(effects, vec![Effect::FetchCatalog]);
        assert!(state.refreshing);
    }

    #[test]
    fn loaded_catalog_becomes_ready_and_displayed() {
        let state = loaded_state(three_records());
        assert_eq!(state.phase, CatalogPhase::Ready);
        assert_eq!(state.displayed, vec![0, 1, 2]);
        assert!(!state.refreshing);
    }

    #[test]
    fn failed_initial_fetch_enters_failed_phase() {
        let mut state = GalleryState::new();
        state.apply(AppEvent::CatalogFailed("connection refused".to_string()));
        assert_eq!(
            state.phase,
            CatalogPhase::Failed("connection refused".to_string())
        );
    }

    #[test]
    fn failed_refresh_shows_error_and_keeps_catalog() {
        let mut state = loaded_state(three_records());
        state.apply(AppEvent::RefreshRequested);
        state.apply(AppEvent::CatalogFailed("timed out".to_string()));
        // The cards give way to the error; the cache survives for the
        // next gesture.
        assert_eq!(state.last_error.as_deref(), Some("timed out"));
        assert_eq!(state.phase, CatalogPhase::Ready);
        assert_eq!(state.catalog.len(), 3);
        assert!(!state.refreshing);
    }

    #[test]
    fn search_after_failed_refresh_restores_cached_cards() {
        let mut state = loaded_state(three_records());
        state.apply(AppEvent::RefreshRequested);
        state.apply(AppEvent::CatalogFailed("boom".to_string()));
        let effects = state.apply(AppEvent::SearchChanged("nikon".to_string()));
        assert!(effects.is_empty());
        assert_eq!(state.last_error, None);
        assert_eq!(state.displayed, vec![1]);
    }

    #[test]
    fn retry_after_failed_refresh_clears_the_error() {
        let mut state = loaded_state(three_records());
        state.apply(AppEvent::RefreshRequested);
        state.apply(AppEvent::CatalogFailed("boom".to_string()));
        let effects = state.apply(AppEvent::RefreshRequested);
        assert_eq!(effects, vec![Effect::FetchCatalog]);
        assert_eq!(state.last_error, None);
        assert!(state.refreshing);
    }

    #[test]
    fn search_narrows_displayed_without_refetching() {
        let mut state = loaded_state(three_records());
        let effects = state.apply(AppEvent::SearchChanged("nikon".to_string()));
        assert!(effects.is_empty());
        assert_eq!(state.displayed, vec![1]);
        assert_eq!(state.catalog.len(), 3);
    }

    #[test]
    fn open_lightbox_requests_full_image() {
        let mut state = loaded_state(three_records());
        let effects = state.apply(AppEvent::OpenLightbox(1));
        assert_eq!(
            effects,
            vec![Effect::FetchFullImage {
                hash: "hash-b".to_string()
            }]
        );
        assert_eq!(state.lightbox, Some(1));
    }

    #[test]
    fn open_lightbox_ignores_out_of_range_position() {
        let mut state = loaded_state(three_records());
        assert!(state.apply(AppEvent::OpenLightbox(7)).is_empty());
        assert_eq!(state.lightbox, None);
    }

    #[test]
    fn lightbox_wraps_both_directions() {
        let mut state = loaded_state(three_records());
        state.apply(AppEvent::OpenLightbox(2));
        let effects = state.apply(AppEvent::NextImage);
        assert_eq!(state.lightbox, Some(0));
        assert_eq!(
            effects,
            vec![Effect::FetchFullImage {
                hash: "hash-a".to_string()
            }]
        );
        state.apply(AppEvent::PrevImage);
        assert_eq!(state.lightbox, Some(2));
    }

    #[test]
    fn single_entry_lightbox_wraps_onto_itself() {
        // Filter down to the one Nikon record, open it, and step: the
        // cursor keeps pointing at the same record in both directions.
        let mut state = loaded_state(three_records());
        state.apply(AppEvent::SearchChanged("nikon".to_string()));
        assert_eq!(state.displayed.len(), 1);
        state.apply(AppEvent::OpenLightbox(0));
        state.apply(AppEvent::NextImage);
        assert_eq!(state.lightbox, Some(0));
        assert_eq!(
            state.lightbox_record().map(|r| r.file_hash.as_str()),
            Some("hash-b")
        );
        state.apply(AppEvent::PrevImage);
        assert_eq!(state.lightbox, Some(0));
    }

    #[test]
    fn narrowing_filter_clamps_open_lightbox_cursor() {
        let mut state = loaded_state(three_records());
        state.apply(AppEvent::OpenLightbox(2));
        let effects = state.apply(AppEvent::SearchChanged("nikon".to_string()));
        assert_eq!(state.lightbox, Some(0));
        assert_eq!(
            effects,
            vec![Effect::FetchFullImage {
                hash: "hash-b".to_string()
            }]
        );
    }

    #[test]
    fn emptying_filter_closes_lightbox() {
        let mut state = loaded_state(three_records());
        state.apply(AppEvent::OpenLightbox(0));
        state.apply(AppEvent::SearchChanged("no such thing".to_string()));
        assert_eq!(state.lightbox, None);
        assert!(state.displayed.is_empty());
    }

    #[test]
    fn steps_without_open_lightbox_do_nothing() {
        let mut state = loaded_state(three_records());
        assert!(state.apply(AppEvent::NextImage).is_empty());
        assert!(state.apply(AppEvent::PrevImage).is_empty());
        assert_eq!(state.lightbox, None);
    }

    #[test]
    fn menu_opens_only_for_records_with_duplicates() {
        let mut state = loaded_state(three_records());
        state.apply(AppEvent::OpenMenu {
            hash: "hash-a".to_string(),
            extra_count: 0,
        });
        assert!(state.menu.is_none());
        state.apply(AppEvent::OpenMenu {
            hash: "hash-a".to_string(),
            extra_count: 2,
        });
        let menu = state.menu.as_ref().unwrap();
        assert_eq!(menu.extra_count, 2);
        assert_eq!(menu.stage, MenuStage::Choosing);
    }

    #[test]
    fn opening_a_second_menu_replaces_the_first() {
        let mut state = loaded_state(three_records());
        state.apply(AppEvent::OpenMenu {
            hash: "hash-a".to_string(),
            extra_count: 1,
        });
        state.apply(AppEvent::OpenMenu {
            hash: "hash-b".to_string(),
            extra_count: 2,
        });
        let menu = state.menu.as_ref().unwrap();
        assert_eq!(menu.hash, "hash-b");
        assert_eq!(menu.stage, MenuStage::Choosing);
    }

    #[test]
    fn choosing_menu_leaves_the_rest_of_the_ui_live() {
        let mut state = loaded_state(three_records());
        state.apply(AppEvent::OpenMenu {
            hash: "hash-a".to_string(),
            extra_count: 1,
        });
        let effects = state.apply(AppEvent::SearchChanged("nikon".to_string()));
        assert!(effects.is_empty());
        assert_eq!(state.displayed, vec![1]);
        assert!(state.menu.is_some());
    }

    #[test]
    fn unanswered_confirmation_blocks_other_gestures() {
        let mut state = loaded_state(three_records());
        state.apply(AppEvent::OpenMenu {
            hash: "hash-a".to_string(),
            extra_count: 1,
        });
        state.apply(AppEvent::ChooseMode(DeleteMode::KeepOne));
        assert!(state.apply(AppEvent::OpenLightbox(0)).is_empty());
        assert_eq!(state.lightbox, None);
        assert!(state.apply(AppEvent::SearchChanged("x".to_string())).is_empty());
        assert_eq!(state.query, "");
        // Another badge click cannot displace the pending confirmation.
        state.apply(AppEvent::OpenMenu {
            hash: "hash-b".to_string(),
            extra_count: 5,
        });
        assert_eq!(state.menu.as_ref().unwrap().hash, "hash-a");
    }

    #[test]
    fn background_results_still_land_while_confirming() {
        let mut state = loaded_state(three_records());
        state.apply(AppEvent::OpenMenu {
            hash: "hash-a".to_string(),
            extra_count: 1,
        });
        state.apply(AppEvent::ChooseMode(DeleteMode::KeepOne));
        state.apply(AppEvent::CatalogLoaded(vec![record("/p/z.jpg", "hash-z")]));
        assert_eq!(state.catalog.len(), 1);
        assert!(state.menu.is_some());
    }

    #[test]
    fn delete_requires_mode_choice_then_confirmation() {
        let mut state = loaded_state(three_records());
        state.apply(AppEvent::OpenMenu {
            hash: "hash-b".to_string(),
            extra_count: 2,
        });
        // Confirming before any mode was chosen does nothing.
        assert!(state.apply(AppEvent::ConfirmDelete).is_empty());
        assert_eq!(state.menu.as_ref().unwrap().stage, MenuStage::Choosing);

        state.apply(AppEvent::ChooseMode(DeleteMode::KeepOne));
        assert_eq!(
            state.menu.as_ref().unwrap().stage,
            MenuStage::Confirming(DeleteMode::KeepOne)
        );

        let effects = state.apply(AppEvent::ConfirmDelete);
        assert_eq!(
            effects,
            vec![Effect::DeleteDuplicates {
                hash: "hash-b".to_string(),
                mode: DeleteMode::KeepOne,
            }]
        );
        assert!(state.menu.is_none());
    }

    #[test]
    fn exactly_one_delete_request_per_confirmation() {
        let mut state = loaded_state(three_records());
        state.apply(AppEvent::OpenMenu {
            hash: "hash-b".to_string(),
            extra_count: 2,
        });
        state.apply(AppEvent::ChooseMode(DeleteMode::All));
        assert_eq!(state.apply(AppEvent::ConfirmDelete).len(), 1);
        assert!(state.apply(AppEvent::ConfirmDelete).is_empty());
    }

    #[test]
    fn declining_closes_the_menu_without_a_request() {
        let mut state = loaded_state(three_records());
        state.apply(AppEvent::OpenMenu {
            hash: "hash-b".to_string(),
            extra_count: 2,
        });
        state.apply(AppEvent::ChooseMode(DeleteMode::All));
        let effects = state.apply(AppEvent::DeclineDelete);
        assert!(effects.is_empty());
        assert!(state.menu.is_none());
        assert_eq!(state.catalog.len(), 3);
    }

    #[test]
    fn dismiss_closes_the_menu_without_a_request() {
        let mut state = loaded_state(three_records());
        state.apply(AppEvent::OpenMenu {
            hash: "hash-b".to_string(),
            extra_count: 2,
        });
        assert!(state.apply(AppEvent::DismissMenu).is_empty());
        assert!(state.menu.is_none());
    }

    #[test]
    fn successful_delete_reports_and_refreshes() {
        let mut state = loaded_state(three_records());
        state.apply(AppEvent::OpenMenu {
            hash: "hash-b".to_string(),
            extra_count: 2,
        });
        state.apply(AppEvent::ChooseMode(DeleteMode::KeepOne));
        state.apply(AppEvent::ConfirmDelete);
        let effects = state.apply(AppEvent::DeleteSucceeded(
            "Deleted 2 duplicate files".to_string(),
        ));
        assert_eq!(effects, vec![Effect::FetchCatalog]);
        assert_eq!(state.status_line, "Deleted 2 duplicate files");
        assert!(state.refreshing);
    }

    #[test]
    fn failed_delete_keeps_catalog_and_shows_error() {
        let mut state = loaded_state(three_records());
        state.apply(AppEvent::OpenMenu {
            hash: "hash-b".to_string(),
            extra_count: 2,
        });
        state.apply(AppEvent::ChooseMode(DeleteMode::All));
        state.apply(AppEvent::ConfirmDelete);
        let effects = state.apply(AppEvent::DeleteFailed("Image not found".to_string()));
        assert!(effects.is_empty());
        assert_eq!(state.status_line, "Image not found");
        assert_eq!(state.catalog.len(), 3);
    }

    #[test]
    fn two_duplicate_record_resolves_with_keep_one_for_its_hash() {
        // One record with two extra copies: open its menu, pick
        // keep-one, confirm. Exactly one delete leaves, for that hash.
        let mut rec = record("/p/x.jpg", "a1");
        rec.duplicate_paths = vec!["/p/x2.jpg".to_string(), "/p/x3.jpg".to_string()];
        let mut state = loaded_state(vec![rec]);

        let hash = state.catalog[0].file_hash.clone();
        let extra = state.catalog[0].duplicate_paths.len();
        state.apply(AppEvent::OpenMenu {
            hash,
            extra_count: extra,
        });
        assert_eq!(state.menu.as_ref().unwrap().extra_count, 2);

        state.apply(AppEvent::ChooseMode(DeleteMode::KeepOne));
        let effects = state.apply(AppEvent::ConfirmDelete);
        assert_eq!(
            effects,
            vec![Effect::DeleteDuplicates {
                hash: "a1".to_string(),
                mode: DeleteMode::KeepOne,
            }]
        );
        assert!(state.menu.is_none());
    }

    #[test]
    fn status_panel_fetches_on_open_and_drops_stale_results() {
        let mut state = loaded_state(three_records());
        let effects = state.apply(AppEvent::OpenStatusPanel);
        assert_eq!(effects, vec![Effect::FetchStatus]);
        assert_eq!(state.status_panel, Some(StatusPanel::Loading));

        state.apply(AppEvent::StatusLoaded(1523));
        assert_eq!(state.status_panel, Some(StatusPanel::Ready(1523)));

        state.apply(AppEvent::CloseStatusPanel);
        state.apply(AppEvent::StatusLoaded(9));
        assert_eq!(state.status_panel, None);
    }

    #[test]
    fn status_panel_shows_failure() {
        let mut state = loaded_state(three_records());
        state.apply(AppEvent::OpenStatusPanel);
        state.apply(AppEvent::StatusFailed("unreachable".to_string()));
        assert_eq!(
            state.status_panel,
            Some(StatusPanel::Failed("unreachable".to_string()))
        );
    }

    #[test]
    fn refresh_landing_replaces_catalog_and_reapplies_query() {
        let mut state = loaded_state(three_records());
        state.apply(AppEvent::SearchChanged("nikon".to_string()));
        assert_eq!(state.displayed, vec![1]);

        // The resolved catalog no longer carries the Nikon record.
        state.apply(AppEvent::CatalogLoaded(vec![
            record("/p/a.jpg", "hash-a"),
            record("/p/c.jpg", "hash-c"),
        ]));
        assert!(state.displayed.is_empty());
        assert_eq!(state.catalog.len(), 2);
    }
}
