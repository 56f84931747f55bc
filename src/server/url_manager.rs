//! Registration of application modules under the API prefix.
//!
//! Every application module (see [`crate::server::apps`]) exposes a list of [`Url`]s through
//! the [`Module`] trait. At start up [`register_modules`] mounts the modules listed in
//! `INSTALLED_MODULES` under [`ENDPOINT_API`]. A module or route that cannot be registered is
//! logged and skipped so the rest of the application still starts.

use std::collections::HashSet;

use utoipa_axum::router::OpenApiRouter;

use crate::server::{
    apps::{home::HomeModule, users::UsersModule},
    config::ENDPOINT_API,
    model::app::AppState,
};

/// Endpoints under [`ENDPOINT_API`] served by the application itself.
pub static RESERVED_ENDPOINTS: &[&str] = &["/docs", "/redocs", "/openapi.json"];

/// A router to mount at `{ENDPOINT_API}{endpoint}`.
pub struct Url {
    router: OpenApiRouter<AppState>,
    endpoint: String,
}

impl Url {
    pub fn new(router: OpenApiRouter<AppState>, endpoint: impl Into<String>) -> Self {
        Self {
            router,
            endpoint: endpoint.into(),
        }
    }

    /// Path the router is nested at, e.g. `/api/home`.
    pub fn full_prefix(&self) -> String {
        format!("{}{}", ENDPOINT_API, self.endpoint)
    }

    /// Nests the router into `app`.
    ///
    /// The route is skipped, with an error logged, when the endpoint is invalid or its
    /// prefix was already registered. Registered prefixes are recorded in `registered`.
    pub fn register(
        self,
        app: OpenApiRouter<AppState>,
        registered: &mut HashSet<String>,
    ) -> OpenApiRouter<AppState> {
        let full_prefix = self.full_prefix();

        if let Err(reason) = validate_endpoint(&self.endpoint) {
            tracing::error!("Error registering route {}: {}", full_prefix, reason);

            return app;
        }

        if !registered.insert(full_prefix.clone()) {
            tracing::error!(
                "Error registering route {}: prefix is already registered",
                full_prefix
            );

            return app;
        }

        tracing::info!("Route registered: {}", full_prefix);

        app.nest(&full_prefix, self.router)
    }
}

fn validate_endpoint(endpoint: &str) -> Result<(), String> {
    if !endpoint.starts_with('/') || endpoint.len() < 2 {
        return Err(format!("endpoint '{}' must start with '/' followed by a name", endpoint));
    }

    if endpoint.ends_with('/') {
        return Err(format!("endpoint '{}' must not end with '/'", endpoint));
    }

    if endpoint.contains("//") {
        return Err(format!("endpoint '{}' contains an empty segment", endpoint));
    }

    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '_' | '.');
    if !endpoint.chars().all(allowed) {
        return Err(format!(
            "endpoint '{}' may only contain letters, digits, '-', '_', '.' and '/'",
            endpoint
        ));
    }

    if RESERVED_ENDPOINTS
        .iter()
        .any(|reserved| endpoint == *reserved || endpoint.starts_with(&format!("{}/", reserved)))
    {
        return Err(format!("endpoint '{}' is reserved", endpoint));
    }

    Ok(())
}

/// An application module that can be listed in `INSTALLED_MODULES`.
pub trait Module: Send + Sync {
    /// Name used in `INSTALLED_MODULES`
    fn name(&self) -> &'static str;

    fn urlpatterns(&self) -> Vec<Url>;
}

/// Modules the application knows about, looked up by name.
pub struct ModuleRegistry {
    modules: Vec<Box<dyn Module>>,
}

impl ModuleRegistry {
    /// Creates a registry without modules.
    pub fn empty() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    pub fn with_module(mut self, module: impl Module + 'static) -> Self {
        self.modules.push(Box::new(module));
        self
    }

    pub fn find(&self, name: &str) -> Option<&dyn Module> {
        self.modules
            .iter()
            .find(|module| module.name() == name)
            .map(|module| module.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.modules.iter().map(|module| module.name()).collect()
    }
}

impl Default for ModuleRegistry {
    /// Every module shipped with the backend.
    fn default() -> Self {
        Self::empty()
            .with_module(HomeModule)
            .with_module(UsersModule)
    }
}

/// Mounts every module named in `installed`, in order, onto `app`.
pub fn register_modules(
    app: OpenApiRouter<AppState>,
    registry: &ModuleRegistry,
    installed: &[String],
) -> OpenApiRouter<AppState> {
    tracing::info!("Loading resources...");

    if installed.is_empty() {
        tracing::info!("No modules listed in INSTALLED_MODULES, skipping URL registration");

        return app;
    }

    let mut app = app;
    let mut registered = HashSet::new();

    for name in installed {
        let Some(module) = registry.find(name) else {
            tracing::error!(
                "Module not found: '{}' (available: {})",
                name,
                registry.names().join(", ")
            );
            continue;
        };

        let urlpatterns = module.urlpatterns();
        if urlpatterns.is_empty() {
            tracing::info!(
                "urlpatterns of module '{}' is empty, no routes to register",
                name
            );
            continue;
        }

        for url in urlpatterns {
            app = url.register(app, &mut registered);
        }
    }

    app
}
