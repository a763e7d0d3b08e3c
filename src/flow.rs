//! Stateful front ends for the two user flows.
//!
//! A [`Flow`] owns what a form shows between requests: a loading flag, the
//! last successful result and an optional error message. [`RecipeSearch`] and
//! [`NutritionAnalyzer`] are thin wrappers that pick the endpoint and decide
//! what a failure looks like to the user.

use log::{debug, error};
use tokio::sync::watch;

use crate::client::EdamamClient;
use crate::endpoint::{Endpoint, NutritionDetailsEndpoint, RecipeSearchEndpoint};
use crate::model::{NutritionAnalysis, RecipeSubmission, RecipeSummary, SearchQuery};
use crate::view::{NutritionView, RecipeCard};
use crate::FinderError;

/// What a flow does with a failed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Store a user-facing message in [`Flow::error`]
    Display,
    /// Only log the failure; the displayed state is left untouched
    LogOnly,
}

/// Loading, result and error state for one kind of request
#[derive(Debug)]
pub struct Flow<T> {
    client: EdamamClient,
    result: Option<T>,
    error: Option<String>,
    loading: watch::Sender<bool>,
    policy: ErrorPolicy,
    name: &'static str,
}

/// Resets the loading flag when a run finishes, fails or is dropped mid-request
struct LoadingGuard<'a>(&'a watch::Sender<bool>);

impl<'a> LoadingGuard<'a> {
    fn start(loading: &'a watch::Sender<bool>) -> Self {
        loading.send_replace(true);
        LoadingGuard(loading)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_replace(false);
    }
}

impl<T> Flow<T> {
    pub fn new(client: EdamamClient, policy: ErrorPolicy, name: &'static str) -> Self {
        let (loading, _) = watch::channel(false);
        Self {
            client,
            result: None,
            error: None,
            loading,
            policy,
            name,
        }
    }

    /// Issue one request for `endpoint` and update the displayed state.
    ///
    /// `&mut self` keeps a second run from starting while one is in flight.
    /// The outcome is returned as well, whatever the error policy says.
    pub async fn run<E>(&mut self, endpoint: E) -> Result<&T, FinderError>
    where
        E: Endpoint<Output = T>,
    {
        let _loading = LoadingGuard::start(&self.loading);
        self.error = None;
        debug!("{}: request started", self.name);

        match self.client.execute(&endpoint).await {
            Ok(output) => {
                debug!("{}: request finished", self.name);
                Ok(&*self.result.insert(output))
            }
            Err(e) => {
                error!("{}: {}", self.name, e);
                if self.policy == ErrorPolicy::Display {
                    self.error = Some(e.user_message());
                }
                Err(e)
            }
        }
    }

    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Watch the loading flag; the receiver sees every change made by [`Flow::run`]
    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }
}

/// Keyword and diet search; failures are logged but never shown
#[derive(Debug)]
pub struct RecipeSearch {
    flow: Flow<Vec<RecipeSummary>>,
}

impl RecipeSearch {
    pub fn new(client: EdamamClient) -> Self {
        Self {
            flow: Flow::new(client, ErrorPolicy::LogOnly, "recipe search"),
        }
    }

    /// Replace the displayed recipes with the results for `query`
    pub async fn search(&mut self, query: SearchQuery) -> Result<&[RecipeSummary], FinderError> {
        self.flow
            .run(RecipeSearchEndpoint::new(query))
            .await
            .map(Vec::as_slice)
    }

    /// Recipes from the last successful search
    pub fn recipes(&self) -> &[RecipeSummary] {
        self.flow.result().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn cards(&self) -> Vec<RecipeCard> {
        self.recipes().iter().map(RecipeCard::from).collect()
    }

    /// Always `None`: this flow has no error display
    pub fn error(&self) -> Option<&str> {
        self.flow.error()
    }

    pub fn is_loading(&self) -> bool {
        self.flow.is_loading()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.flow.subscribe_loading()
    }
}

/// Title and ingredient submission for nutrition analysis
#[derive(Debug)]
pub struct NutritionAnalyzer {
    flow: Flow<NutritionAnalysis>,
    title: String,
}

impl NutritionAnalyzer {
    pub fn new(client: EdamamClient) -> Self {
        Self {
            flow: Flow::new(client, ErrorPolicy::Display, "nutrition analysis"),
            title: String::new(),
        }
    }

    /// Analyze a recipe given its title and the raw ingredient text, one ingredient per line
    pub async fn analyze(
        &mut self,
        title: &str,
        ingredients: &str,
    ) -> Result<&NutritionAnalysis, FinderError> {
        self.submit(RecipeSubmission::from_text(title, ingredients))
            .await
    }

    pub async fn submit(
        &mut self,
        submission: RecipeSubmission,
    ) -> Result<&NutritionAnalysis, FinderError> {
        self.title = submission.title.clone();
        self.flow
            .run(NutritionDetailsEndpoint::new(submission))
            .await
    }

    pub fn analysis(&self) -> Option<&NutritionAnalysis> {
        self.flow.result()
    }

    /// Display-ready form of the last analysis, headed by the last submitted title
    pub fn view(&self) -> Option<NutritionView> {
        self.analysis()
            .map(|analysis| NutritionView::new(&self.title, analysis))
    }

    pub fn error(&self) -> Option<&str> {
        self.flow.error()
    }

    pub fn is_loading(&self) -> bool {
        self.flow.is_loading()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.flow.subscribe_loading()
    }
}
