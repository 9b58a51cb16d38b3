//! Client-side core of the visa catalog admin dashboard: normalization of
//! loosely-typed remote records, cascading selection state, and mutation
//! sequencing with refresh-after-mutation against a [`RemoteCatalog`].
//!
//! The presentation layer is a thin host: it invokes the command methods on
//! [`AdminWorkbench`], reads state back through the accessors, and reacts to
//! the broadcast [`WorkbenchEvent`] stream. Errors never escape the
//! workbench; they surface as alerts and per-scope error slots.

use std::sync::Arc;

use catalog_client::{mock, ExpertSearch, RemoteCatalog};
use shared::domain::{Country, ExpertId, Specialist, VisaType};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

pub mod alert;
pub mod normalize;
pub mod selection;

use alert::{Alert, AlertSlot};
use normalize::{SpecialistForm, VisaForm};
use selection::{ExpertFilters, ExpertQuery, FetchToken, FormCascade, VisaCascade};

/// Which collections substitute their fixed mock dataset when a fetch yields
/// zero records. The defaults preserve the observed asymmetry: specialists
/// fall back, visa types and countries never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackPolicy {
    pub countries: bool,
    pub visa_types: bool,
    pub specialists: bool,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self {
            countries: false,
            visa_types: false,
            specialists: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit,
}

#[derive(Debug, Clone)]
pub enum WorkbenchEvent {
    CountriesUpdated(Vec<Country>),
    VisaTypesUpdated {
        country: Country,
        visa_types: Vec<VisaType>,
    },
    SpecialistsUpdated(Vec<Specialist>),
    FormCatalogUpdated {
        country: Country,
        visa_types: Vec<VisaType>,
    },
    AlertRaised(Alert),
}

/// Last failure message per fetch scope, kept for the host's Retry
/// affordance. Cleared when the scope is fetched again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeErrors {
    pub countries: Option<String>,
    pub visa_types: Option<String>,
    pub specialists: Option<String>,
    pub form_catalog: Option<String>,
    pub operations: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingFlags {
    pub countries: bool,
    pub visa_types: bool,
    pub specialists: bool,
    pub form_catalog: bool,
    pub operation: bool,
}

#[derive(Debug)]
struct VisaEditor {
    mode: FormMode,
    /// Original key in edit mode; the key is write-once after creation.
    key: Option<String>,
    form: VisaForm,
}

#[derive(Debug)]
struct SpecialistEditor {
    mode: FormMode,
    id: Option<ExpertId>,
    form: SpecialistForm,
}

#[derive(Default)]
struct WorkbenchState {
    countries: Vec<Country>,
    countries_loading: bool,
    visa_cascade: VisaCascade,
    specialists: Vec<Specialist>,
    specialists_loading: bool,
    specialists_generation: u64,
    selected_specialist: Option<ExpertId>,
    expert_filters: ExpertFilters,
    form_cascade: FormCascade,
    visa_editor: Option<VisaEditor>,
    specialist_editor: Option<SpecialistEditor>,
    alert: AlertSlot,
    errors: ScopeErrors,
    op_in_flight: bool,
}

pub struct AdminWorkbench {
    catalog: Arc<dyn RemoteCatalog>,
    fallback: FallbackPolicy,
    inner: Mutex<WorkbenchState>,
    events: broadcast::Sender<WorkbenchEvent>,
}

impl AdminWorkbench {
    pub fn new(catalog: Arc<dyn RemoteCatalog>) -> Arc<Self> {
        Self::with_fallback(catalog, FallbackPolicy::default())
    }

    pub fn with_fallback(catalog: Arc<dyn RemoteCatalog>, fallback: FallbackPolicy) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            catalog,
            fallback,
            inner: Mutex::new(WorkbenchState::default()),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<WorkbenchEvent> {
        self.events.subscribe()
    }

    async fn raise_alert(&self, alert: Alert) {
        self.inner.lock().await.alert.show(alert.clone());
        let _ = self.events.send(WorkbenchEvent::AlertRaised(alert));
    }

    // ---- countries ----

    pub async fn load_countries(&self) {
        {
            let mut guard = self.inner.lock().await;
            guard.countries_loading = true;
            guard.errors.countries = None;
        }

        match self.catalog.list_countries().await {
            Ok(mut countries) => {
                if countries.is_empty() && self.fallback.countries {
                    info!("country listing came back empty; substituting mock catalog");
                    countries = mock::mock_countries();
                }
                {
                    let mut guard = self.inner.lock().await;
                    guard.countries_loading = false;
                    guard.countries = countries.clone();
                }
                let _ = self.events.send(WorkbenchEvent::CountriesUpdated(countries));
            }
            Err(err) => {
                let message = err.user_message();
                warn!(error = %err, "country listing failed");
                {
                    let mut guard = self.inner.lock().await;
                    guard.countries_loading = false;
                    guard.errors.countries = Some(message.clone());
                    if self.fallback.countries {
                        guard.countries = mock::mock_countries();
                    }
                }
                self.raise_alert(Alert::danger(format!("Error fetching countries: {message}")))
                    .await;
            }
        }
    }

    // ---- visa cascade ----

    pub async fn select_country(&self, country: Country) {
        let token = {
            let mut guard = self.inner.lock().await;
            guard.errors.visa_types = None;
            guard.visa_cascade.select_country(country.clone())
        };
        self.fetch_visa_types(token, country).await;
    }

    pub async fn clear_country_selection(&self) {
        let mut guard = self.inner.lock().await;
        guard.visa_cascade.clear_country();
        guard.errors.visa_types = None;
    }

    /// Re-issues the visa-type fetch for the current country (the Retry
    /// affordance after a failed load).
    pub async fn reload_visa_types(&self) {
        let pending = {
            let mut guard = self.inner.lock().await;
            let country = guard.visa_cascade.country().cloned();
            let token = guard.visa_cascade.begin_refresh();
            if token.is_some() {
                guard.errors.visa_types = None;
            }
            country.zip(token)
        };
        if let Some((country, token)) = pending {
            self.fetch_visa_types(token, country).await;
        }
    }

    async fn fetch_visa_types(&self, token: FetchToken, country: Country) {
        match self.catalog.list_visa_types(&country).await {
            Ok(raw) => {
                let mut visa_types: Vec<VisaType> =
                    raw.iter().map(normalize::visa_record).collect();
                if visa_types.is_empty() && self.fallback.visa_types {
                    info!(country = %country, "visa listing came back empty; substituting mock catalog");
                    visa_types = mock::mock_visa_types(&country);
                }
                let applied = {
                    let mut guard = self.inner.lock().await;
                    guard.visa_cascade.apply_visa_types(token, visa_types.clone())
                };
                if applied {
                    let _ = self.events.send(WorkbenchEvent::VisaTypesUpdated {
                        country,
                        visa_types,
                    });
                }
            }
            Err(err) => {
                let message = err.user_message();
                warn!(country = %country, error = %err, "visa type listing failed");
                let current = {
                    let mut guard = self.inner.lock().await;
                    let current = guard.visa_cascade.fail_load(token);
                    if current {
                        guard.errors.visa_types = Some(message.clone());
                    }
                    current
                };
                if current {
                    self.raise_alert(Alert::danger(format!(
                        "Error fetching visa types: {message}"
                    )))
                    .await;
                }
            }
        }
    }

    pub async fn select_visa(&self, visa_type: &str) -> bool {
        let mut guard = self.inner.lock().await;
        guard.visa_cascade.select_visa(visa_type)
    }

    pub async fn clear_visa_selection(&self) {
        self.inner.lock().await.visa_cascade.clear_visa();
    }

    // ---- visa editor ----

    pub async fn open_add_visa(&self) -> Option<VisaForm> {
        let mut guard = self.inner.lock().await;
        if guard.visa_cascade.country().is_none() {
            debug!("add-visa refused: no country selected");
            return None;
        }
        let form = VisaForm::default();
        guard.visa_editor = Some(VisaEditor {
            mode: FormMode::Add,
            key: None,
            form: form.clone(),
        });
        Some(form)
    }

    pub async fn open_edit_visa(&self) -> Option<VisaForm> {
        let record = {
            let guard = self.inner.lock().await;
            guard.visa_cascade.selected_record().cloned()
        };
        let Some(record) = record else {
            self.raise_alert(Alert::warning("Please select a visa to edit"))
                .await;
            return None;
        };
        let form = VisaForm::from_record(&record);
        let mut guard = self.inner.lock().await;
        guard.visa_editor = Some(VisaEditor {
            mode: FormMode::Edit,
            key: Some(record.visa_type.clone()),
            form: form.clone(),
        });
        Some(form)
    }

    /// Replaces the visa editing buffer. In edit mode the key field is
    /// write-once, so any edit to it is reverted to the original key.
    pub async fn set_visa_form(&self, form: VisaForm) {
        let mut guard = self.inner.lock().await;
        if let Some(editor) = guard.visa_editor.as_mut() {
            editor.form = form;
            if let (FormMode::Edit, Some(key)) = (editor.mode, editor.key.as_ref()) {
                editor.form.visa_type = key.clone();
            }
        }
    }

    pub async fn visa_form(&self) -> Option<VisaForm> {
        self.inner
            .lock()
            .await
            .visa_editor
            .as_ref()
            .map(|editor| editor.form.clone())
    }

    pub async fn cancel_visa_editor(&self) {
        self.inner.lock().await.visa_editor = None;
    }

    /// Runs the mutation protocol for the open visa editor: validate without
    /// touching the network, issue exactly one create or update, then
    /// re-fetch the country's list rather than trusting the response body.
    /// On failure the editor stays open for a retry.
    pub async fn submit_visa(&self) -> bool {
        let (mode, key, form, country) = {
            let guard = self.inner.lock().await;
            if guard.op_in_flight {
                warn!("visa submit refused: another operation is in flight");
                return false;
            }
            let Some(editor) = guard.visa_editor.as_ref() else {
                debug!("visa submit invoked without an open editor");
                return false;
            };
            let Some(country) = guard.visa_cascade.country().cloned() else {
                debug!("visa submit refused: no country selected");
                return false;
            };
            (editor.mode, editor.key.clone(), editor.form.clone(), country)
        };

        let payload = match form.submission() {
            Ok(payload) => payload,
            Err(err) => {
                self.raise_alert(Alert::danger(err.to_string())).await;
                return false;
            }
        };

        {
            let mut guard = self.inner.lock().await;
            guard.op_in_flight = true;
            guard.errors.operations = None;
        }

        let result = match mode {
            FormMode::Add => self
                .catalog
                .create_visa(&country, &payload)
                .await
                .map(|_| ()),
            FormMode::Edit => {
                let key = key.unwrap_or_else(|| payload.visa_type.clone());
                self.catalog
                    .update_visa(&country, &key, &payload)
                    .await
                    .map(|_| ())
            }
        };

        match result {
            Ok(()) => {
                let verb = match mode {
                    FormMode::Add => "added",
                    FormMode::Edit => "updated",
                };
                info!(country = %country, visa_type = %payload.visa_type, "visa {verb}");
                self.raise_alert(Alert::success(format!(
                    "Successfully {verb} {}",
                    payload.visa_type
                )))
                .await;
                let refresh = {
                    let mut guard = self.inner.lock().await;
                    guard.visa_editor = None;
                    guard.op_in_flight = false;
                    guard.visa_cascade.begin_refresh()
                };
                if let Some(token) = refresh {
                    self.fetch_visa_types(token, country).await;
                }
                true
            }
            Err(err) => {
                let verb = match mode {
                    FormMode::Add => "adding",
                    FormMode::Edit => "updating",
                };
                let message = err.user_message();
                warn!(country = %country, error = %err, "visa mutation failed");
                {
                    let mut guard = self.inner.lock().await;
                    guard.op_in_flight = false;
                    guard.errors.operations = Some(message.clone());
                }
                self.raise_alert(Alert::danger(format!("Error {verb} visa: {message}")))
                    .await;
                false
            }
        }
    }

    /// Deletes the selected visa type. `confirmed` carries the host's
    /// destructive-intent prompt result; a declined confirmation leaves the
    /// list, the selection, and the backend untouched.
    pub async fn delete_visa(&self, confirmed: bool) -> bool {
        let target = {
            let guard = self.inner.lock().await;
            if guard.op_in_flight {
                warn!("visa delete refused: another operation is in flight");
                return false;
            }
            guard
                .visa_cascade
                .country()
                .cloned()
                .zip(guard.visa_cascade.selected().map(str::to_string))
        };
        let Some((country, key)) = target else {
            self.raise_alert(Alert::warning("Please select a visa to delete"))
                .await;
            return false;
        };
        if !confirmed {
            debug!(visa_type = %key, "visa delete aborted: confirmation declined");
            return false;
        }

        {
            let mut guard = self.inner.lock().await;
            guard.op_in_flight = true;
            guard.errors.operations = None;
        }

        match self.catalog.delete_visa(&country, &key).await {
            Ok(()) => {
                info!(country = %country, visa_type = %key, "visa deleted");
                self.raise_alert(Alert::success(format!("Successfully deleted {key}")))
                    .await;
                let refresh = {
                    let mut guard = self.inner.lock().await;
                    guard.op_in_flight = false;
                    guard.visa_cascade.clear_visa();
                    guard.visa_cascade.begin_refresh()
                };
                if let Some(token) = refresh {
                    self.fetch_visa_types(token, country).await;
                }
                true
            }
            Err(err) => {
                let message = err.user_message();
                warn!(country = %country, visa_type = %key, error = %err, "visa delete failed");
                {
                    let mut guard = self.inner.lock().await;
                    guard.op_in_flight = false;
                    guard.errors.operations = Some(message.clone());
                }
                self.raise_alert(Alert::danger(format!("Error deleting visa: {message}")))
                    .await;
                false
            }
        }
    }

    // ---- specialists ----

    /// Fetches the specialist list through whichever of the four variants the
    /// current filters demand. An empty result substitutes the mock roster
    /// under the default policy; list failures are swallowed by the catalog
    /// contract, so no error alert is raised here.
    pub async fn load_specialists(&self) {
        let (query, generation) = {
            let mut guard = self.inner.lock().await;
            guard.specialists_loading = true;
            guard.errors.specialists = None;
            guard.specialists_generation += 1;
            (guard.expert_filters.query(), guard.specialists_generation)
        };

        let raw = match &query {
            ExpertQuery::All => self.catalog.list_experts(&ExpertSearch::default()).await,
            ExpertQuery::ByCountry(country) => self.catalog.list_experts_by_country(country).await,
            ExpertQuery::ByVisaType(visa_type) => {
                self.catalog.list_experts_by_visa_type(visa_type).await
            }
            ExpertQuery::ByCountryAndVisa(country, visa_type) => {
                self.catalog
                    .list_experts_by_country_and_visa(country, visa_type)
                    .await
            }
        };

        let mut specialists: Vec<Specialist> =
            raw.iter().map(normalize::specialist_record).collect();
        if specialists.is_empty() && self.fallback.specialists {
            info!("expert listing came back empty; substituting mock roster");
            specialists = mock::mock_experts();
        }

        {
            let mut guard = self.inner.lock().await;
            if guard.specialists_generation != generation {
                debug!("discarding stale expert listing");
                return;
            }
            guard.specialists_loading = false;
            guard.specialists = specialists.clone();
            if let Some(id) = guard.selected_specialist.clone() {
                if !specialists
                    .iter()
                    .any(|specialist| specialist.id.as_ref() == Some(&id))
                {
                    guard.selected_specialist = None;
                }
            }
        }
        let _ = self
            .events
            .send(WorkbenchEvent::SpecialistsUpdated(specialists));
    }

    pub async fn set_expert_filters(&self, country: Option<Country>, visa_type: Option<String>) {
        {
            let mut guard = self.inner.lock().await;
            guard.expert_filters = ExpertFilters {
                country: country.filter(|country| !country.as_str().trim().is_empty()),
                visa_type: visa_type.filter(|visa_type| !visa_type.trim().is_empty()),
            };
        }
        self.load_specialists().await;
    }

    pub async fn reset_expert_filters(&self) {
        self.set_expert_filters(None, None).await;
    }

    pub async fn select_specialist(&self, id: &ExpertId) -> bool {
        let mut guard = self.inner.lock().await;
        if guard
            .specialists
            .iter()
            .any(|specialist| specialist.id.as_ref() == Some(id))
        {
            guard.selected_specialist = Some(id.clone());
            true
        } else {
            false
        }
    }

    pub async fn clear_specialist_selection(&self) {
        self.inner.lock().await.selected_specialist = None;
    }

    /// Fetches a single specialist by id, outside the list flow.
    pub async fn fetch_specialist(&self, id: &ExpertId) -> Option<Specialist> {
        match self.catalog.get_expert(id).await {
            Ok(raw) => Some(normalize::specialist_record(&raw)),
            Err(err) => {
                let message = err.user_message();
                warn!(expert = %id, error = %err, "specialist fetch failed");
                self.raise_alert(Alert::danger(format!(
                    "Error fetching specialist: {message}"
                )))
                .await;
                None
            }
        }
    }

    // ---- specialist editor ----

    pub async fn open_add_specialist(&self) -> SpecialistForm {
        let mut guard = self.inner.lock().await;
        let form = SpecialistForm::default();
        guard.form_cascade.clear();
        guard.specialist_editor = Some(SpecialistEditor {
            mode: FormMode::Add,
            id: None,
            form: form.clone(),
        });
        form
    }

    pub async fn open_edit_specialist(&self) -> Option<SpecialistForm> {
        let record = {
            let guard = self.inner.lock().await;
            guard
                .selected_specialist
                .as_ref()
                .and_then(|id| {
                    guard
                        .specialists
                        .iter()
                        .find(|specialist| specialist.id.as_ref() == Some(id))
                })
                .cloned()
        };
        let Some(record) = record else {
            self.raise_alert(Alert::warning("Please select a specialist to edit"))
                .await;
            return None;
        };
        let form = SpecialistForm::from_record(&record);
        let mut guard = self.inner.lock().await;
        guard.form_cascade.clear();
        guard.specialist_editor = Some(SpecialistEditor {
            mode: FormMode::Edit,
            id: record.id.clone(),
            form: form.clone(),
        });
        Some(form)
    }

    /// Replaces the specialist editing buffer. The record identity is not
    /// user-editable and is pinned back to the editor's id.
    pub async fn set_specialist_form(&self, form: SpecialistForm) {
        let mut guard = self.inner.lock().await;
        if let Some(editor) = guard.specialist_editor.as_mut() {
            editor.form = form;
            editor.form.id = editor.id.clone();
        }
    }

    pub async fn specialist_form(&self) -> Option<SpecialistForm> {
        self.inner
            .lock()
            .await
            .specialist_editor
            .as_ref()
            .map(|editor| editor.form.clone())
    }

    pub async fn cancel_specialist_editor(&self) {
        let mut guard = self.inner.lock().await;
        guard.specialist_editor = None;
        guard.form_cascade.clear();
    }

    /// Adds or removes a country of expertise on the open editor.
    pub async fn toggle_specialization_country(&self, country: Country, included: bool) {
        let mut guard = self.inner.lock().await;
        let Some(editor) = guard.specialist_editor.as_mut() else {
            return;
        };
        let countries = &mut editor.form.specialization.countries;
        if included {
            if !countries.contains(&country) {
                countries.push(country);
            }
        } else {
            countries.retain(|existing| existing != &country);
        }
    }

    /// Removes a committed per-country specialization entry from the open
    /// editor.
    pub async fn remove_specialization(&self, country: &Country) {
        let mut guard = self.inner.lock().await;
        if let Some(editor) = guard.specialist_editor.as_mut() {
            normalize::remove_specialization(&mut editor.form.specialization.visa_types, country);
        }
    }

    // ---- specialist form cascade ----

    pub async fn select_form_country(&self, country: Country) {
        let token = {
            let mut guard = self.inner.lock().await;
            let Some(editor) = guard.specialist_editor.as_ref() else {
                debug!("form country pick refused: no specialist editor open");
                return;
            };
            let specialization = editor.form.specialization.clone();
            guard.errors.form_catalog = None;
            guard.form_cascade.select_country(country.clone(), &specialization)
        };
        self.fetch_form_catalog(token, country).await;
    }

    pub async fn clear_form_country(&self) {
        self.inner.lock().await.form_cascade.clear();
    }

    async fn fetch_form_catalog(&self, token: FetchToken, country: Country) {
        match self.catalog.list_visa_types(&country).await {
            Ok(raw) => {
                let mut visa_types: Vec<VisaType> =
                    raw.iter().map(normalize::visa_record).collect();
                if visa_types.is_empty() && self.fallback.visa_types {
                    visa_types = mock::mock_visa_types(&country);
                }
                let applied = {
                    let mut guard = self.inner.lock().await;
                    guard.form_cascade.apply_catalog(token, visa_types.clone())
                };
                if applied {
                    let _ = self.events.send(WorkbenchEvent::FormCatalogUpdated {
                        country,
                        visa_types,
                    });
                }
            }
            Err(err) => {
                let message = err.user_message();
                warn!(country = %country, error = %err, "form catalog fetch failed");
                let current = {
                    let mut guard = self.inner.lock().await;
                    let current = guard.form_cascade.fail_load(token);
                    if current {
                        guard.errors.form_catalog = Some(message.clone());
                    }
                    current
                };
                if current {
                    self.raise_alert(Alert::danger(format!(
                        "Error fetching visa types: {message}"
                    )))
                    .await;
                }
            }
        }
    }

    pub async fn toggle_form_visa_type(&self, visa_type: &str, checked: bool) {
        self.inner.lock().await.form_cascade.toggle(visa_type, checked);
    }

    /// Commits the checked visa types into the editor's specialization by
    /// country-key upsert and resets the picker.
    pub async fn commit_form_visa_types(&self) -> bool {
        let mut guard = self.inner.lock().await;
        let state = &mut *guard;
        let Some(editor) = state.specialist_editor.as_mut() else {
            return false;
        };
        state
            .form_cascade
            .commit_into(&mut editor.form.specialization)
    }

    /// Mutation protocol for the open specialist editor; mirrors
    /// [`Self::submit_visa`] with the specialist list refresh honoring the
    /// current filters.
    pub async fn submit_specialist(&self) -> bool {
        let (mode, id, form) = {
            let guard = self.inner.lock().await;
            if guard.op_in_flight {
                warn!("specialist submit refused: another operation is in flight");
                return false;
            }
            let Some(editor) = guard.specialist_editor.as_ref() else {
                debug!("specialist submit invoked without an open editor");
                return false;
            };
            (editor.mode, editor.id.clone(), editor.form.clone())
        };

        let payload = match form.submission() {
            Ok(payload) => payload,
            Err(err) => {
                self.raise_alert(Alert::danger(err.to_string())).await;
                return false;
            }
        };

        {
            let mut guard = self.inner.lock().await;
            guard.op_in_flight = true;
            guard.errors.operations = None;
        }

        let result = match (mode, id) {
            (FormMode::Add, _) => self.catalog.create_expert(&payload).await.map(|_| ()),
            (FormMode::Edit, Some(id)) => {
                self.catalog.update_expert(&id, &payload).await.map(|_| ())
            }
            (FormMode::Edit, None) => {
                // An edit session without a server id cannot be addressed.
                {
                    let mut guard = self.inner.lock().await;
                    guard.op_in_flight = false;
                }
                warn!(name = %payload.name, "specialist update refused: record has no id");
                self.raise_alert(Alert::danger(
                    "Cannot update a specialist that has never been saved",
                ))
                .await;
                return false;
            }
        };

        match result {
            Ok(()) => {
                let verb = match mode {
                    FormMode::Add => "added",
                    FormMode::Edit => "updated",
                };
                info!(name = %payload.name, "specialist {verb}");
                self.raise_alert(Alert::success(format!(
                    "Successfully {verb} {}",
                    payload.name
                )))
                .await;
                {
                    let mut guard = self.inner.lock().await;
                    guard.specialist_editor = None;
                    guard.form_cascade.clear();
                    guard.op_in_flight = false;
                }
                self.load_specialists().await;
                true
            }
            Err(err) => {
                let verb = match mode {
                    FormMode::Add => "adding",
                    FormMode::Edit => "updating",
                };
                let message = err.user_message();
                warn!(name = %payload.name, error = %err, "specialist mutation failed");
                {
                    let mut guard = self.inner.lock().await;
                    guard.op_in_flight = false;
                    guard.errors.operations = Some(message.clone());
                }
                self.raise_alert(Alert::danger(format!(
                    "Error {verb} specialist: {message}"
                )))
                .await;
                false
            }
        }
    }

    /// Deletes the selected specialist after a confirmed destructive-intent
    /// prompt; declining leaves everything untouched.
    pub async fn delete_specialist(&self, confirmed: bool) -> bool {
        let target = {
            let guard = self.inner.lock().await;
            if guard.op_in_flight {
                warn!("specialist delete refused: another operation is in flight");
                return false;
            }
            guard.selected_specialist.as_ref().and_then(|id| {
                guard
                    .specialists
                    .iter()
                    .find(|specialist| specialist.id.as_ref() == Some(id))
                    .map(|specialist| (id.clone(), specialist.name.clone()))
            })
        };
        let Some((id, name)) = target else {
            self.raise_alert(Alert::warning("Please select a specialist to delete"))
                .await;
            return false;
        };
        if !confirmed {
            debug!(expert = %id, "specialist delete aborted: confirmation declined");
            return false;
        }

        {
            let mut guard = self.inner.lock().await;
            guard.op_in_flight = true;
            guard.errors.operations = None;
        }

        match self.catalog.delete_expert(&id).await {
            Ok(()) => {
                info!(expert = %id, "specialist deleted");
                self.raise_alert(Alert::success(format!("Successfully deleted {name}")))
                    .await;
                {
                    let mut guard = self.inner.lock().await;
                    guard.op_in_flight = false;
                    guard.selected_specialist = None;
                }
                self.load_specialists().await;
                true
            }
            Err(err) => {
                let message = err.user_message();
                warn!(expert = %id, error = %err, "specialist delete failed");
                {
                    let mut guard = self.inner.lock().await;
                    guard.op_in_flight = false;
                    guard.errors.operations = Some(message.clone());
                }
                self.raise_alert(Alert::danger(format!(
                    "Error deleting specialist: {message}"
                )))
                .await;
                false
            }
        }
    }

    // ---- accessors ----

    pub async fn countries(&self) -> Vec<Country> {
        self.inner.lock().await.countries.clone()
    }

    pub async fn selected_country(&self) -> Option<Country> {
        self.inner.lock().await.visa_cascade.country().cloned()
    }

    pub async fn visa_types(&self) -> Vec<VisaType> {
        self.inner.lock().await.visa_cascade.visa_types().to_vec()
    }

    pub async fn selected_visa(&self) -> Option<String> {
        self.inner
            .lock()
            .await
            .visa_cascade
            .selected()
            .map(str::to_string)
    }

    pub async fn specialists(&self) -> Vec<Specialist> {
        self.inner.lock().await.specialists.clone()
    }

    pub async fn selected_specialist(&self) -> Option<Specialist> {
        let guard = self.inner.lock().await;
        guard.selected_specialist.as_ref().and_then(|id| {
            guard
                .specialists
                .iter()
                .find(|specialist| specialist.id.as_ref() == Some(id))
                .cloned()
        })
    }

    pub async fn expert_filters(&self) -> ExpertFilters {
        self.inner.lock().await.expert_filters.clone()
    }

    pub async fn form_country(&self) -> Option<Country> {
        self.inner.lock().await.form_cascade.country().cloned()
    }

    pub async fn form_catalog(&self) -> Vec<VisaType> {
        self.inner.lock().await.form_cascade.catalog().to_vec()
    }

    pub async fn checked_form_visa_types(&self) -> Vec<String> {
        self.inner.lock().await.form_cascade.checked().to_vec()
    }

    pub async fn active_alert(&self) -> Option<Alert> {
        self.inner.lock().await.alert.active().cloned()
    }

    pub async fn dismiss_alert(&self) {
        self.inner.lock().await.alert.dismiss();
    }

    pub async fn operation_in_flight(&self) -> bool {
        self.inner.lock().await.op_in_flight
    }

    pub async fn scope_errors(&self) -> ScopeErrors {
        self.inner.lock().await.errors.clone()
    }

    pub async fn loading(&self) -> LoadingFlags {
        let guard = self.inner.lock().await;
        LoadingFlags {
            countries: guard.countries_loading,
            visa_types: guard.visa_cascade.is_loading(),
            specialists: guard.specialists_loading,
            form_catalog: guard.form_cascade.is_loading(),
            operation: guard.op_in_flight,
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
