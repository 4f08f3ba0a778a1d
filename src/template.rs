use miette::Diagnostic;
use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;

use crate::config::{Features, BLUEPRINT_DIR_NAME, PACKAGE_DIR_NAME};

#[derive(Debug, Error, Diagnostic)]
pub enum TemplateError {
    #[error("Error occurred attempting to register boilerplate templates")]
    #[diagnostic(code(flaskgen::template::registration))]
    Registration {
        #[source]
        source: tera::Error,
    },

    #[error("Error occurred attempting to build the template context")]
    #[diagnostic(code(flaskgen::template::context))]
    Context {
        #[source]
        source: tera::Error,
    },

    #[error("Error occurred attempting to render boilerplate '{name}'")]
    #[diagnostic(code(flaskgen::template::render))]
    Render {
        name: &'static str,
        #[source]
        source: tera::Error,
    },
}

/// Built-in boilerplate bodies. Each maps to one embedded asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boilerplate {
    Runner,
    PackageInit,
    Views,
    BlueprintInit,
    Config,
    Forms,
    Models,
}
impl Boilerplate {
    pub const ALL: [Boilerplate; 7] = [
        Self::Runner,
        Self::PackageInit,
        Self::Views,
        Self::BlueprintInit,
        Self::Config,
        Self::Forms,
        Self::Models,
    ];

    /// Template name, also the name of the asset without its `.tera` suffix.
    pub fn name(self) -> &'static str {
        match self {
            Self::Runner => "run.py",
            Self::PackageInit => "package_init.py",
            Self::Views => "views.py",
            Self::BlueprintInit => "blueprint_init.py",
            Self::Config => "config.py",
            Self::Forms => "forms.py",
            Self::Models => "models.py",
        }
    }

    fn source(self) -> &'static str {
        match self {
            Self::Runner => include_str!("../assets/run.py.tera"),
            Self::PackageInit => include_str!("../assets/package_init.py.tera"),
            Self::Views => include_str!("../assets/views.py.tera"),
            Self::BlueprintInit => include_str!("../assets/blueprint_init.py.tera"),
            Self::Config => include_str!("../assets/config.py.tera"),
            Self::Forms => include_str!("../assets/forms.py.tera"),
            Self::Models => include_str!("../assets/models.py.tera"),
        }
    }
}

/// Values the boilerplate is allowed to vary on.
#[derive(Debug, Serialize)]
struct TemplateVars<'a> {
    package: &'a str,
    blueprint: &'a str,
    use_blueprints: bool,
    include_configs: bool,
    include_forms: bool,
    include_models: bool,
}
impl From<Features> for TemplateVars<'static> {
    fn from(features: Features) -> Self {
        Self {
            package: PACKAGE_DIR_NAME,
            blueprint: BLUEPRINT_DIR_NAME,
            use_blueprints: features.use_blueprints,
            include_configs: features.include_configs,
            include_forms: features.include_forms,
            include_models: features.include_models,
        }
    }
}

/// Renders [`Boilerplate`] for one set of [`Features`].
pub struct Renderer {
    tera: Tera,
    context: Context,
}
impl Renderer {
    pub fn new(features: Features) -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        // generated files are python, never html-escape them
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(Boilerplate::ALL.map(|b| (b.name(), b.source())))
            .map_err(|source| TemplateError::Registration { source })?;

        let context = Context::from_serialize(TemplateVars::from(features))
            .map_err(|source| TemplateError::Context { source })?;

        Ok(Self { tera, context })
    }

    pub fn render(&self, boilerplate: Boilerplate) -> Result<String, TemplateError> {
        log::debug!("rendering boilerplate: {}", boilerplate.name());

        self.tera
            .render(boilerplate.name(), &self.context)
            .map_err(|source| TemplateError::Render {
                name: boilerplate.name(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(features: Features, boilerplate: Boilerplate) -> String {
        Renderer::new(features)
            .unwrap()
            .render(boilerplate)
            .unwrap()
    }

    #[test]
    fn test_every_boilerplate_renders() {
        let renderer = Renderer::new(Features::default()).unwrap();

        for boilerplate in Boilerplate::ALL {
            let rendered = renderer.render(boilerplate);

            assert!(rendered.is_ok(), "failed to render {}", boilerplate.name());
            assert!(!rendered.unwrap().is_empty());
        }
    }

    #[test]
    fn test_package_init_without_blueprints() {
        let rendered = render(Features::default(), Boilerplate::PackageInit);

        assert!(rendered.starts_with("from flask import Flask\n"));
        assert!(rendered.contains("app = Flask(__name__)"));
        assert!(rendered.ends_with("#from app_pkg import views, models\n"));
        assert!(!rendered.contains("register_blueprint"));
    }

    #[test]
    fn test_package_init_appends_blueprint_registration() {
        let features = Features {
            use_blueprints: true,
            ..Features::default()
        };
        let rendered = render(features, Boilerplate::PackageInit);

        assert!(rendered.contains("#from app_pkg import views, models\n# register blueprint\n"));
        assert!(rendered.contains("#from app_pkg.my_blueprint import bp as my_bp\n"));
        assert!(rendered.ends_with("#app.register_blueprint(my_bp)\n"));
    }

    #[test]
    fn test_blueprint_declaration() {
        let rendered = render(Features::default(), Boilerplate::BlueprintInit);

        assert!(rendered.contains("bp = Blueprint('my_blueprint', __name__"));
        assert!(rendered.contains("static_url_path='/my_blueprint/static'"));
    }

    #[test]
    fn test_runner_imports_package() {
        let rendered = render(Features::default(), Boilerplate::Runner);

        assert!(rendered.starts_with("from app_pkg import app\n"));
        assert!(rendered.contains("#app.run(debug=True)"));
        assert!(rendered.contains("#app.run(host='0.0.0.0', threaded=True, debug=True)"));
    }

    #[test]
    fn test_python_braces_survive_rendering() {
        let config = render(Features::default(), Boilerplate::Config);
        let models = render(Features::default(), Boilerplate::Models);

        assert!(config.contains("'postgresql+psycopg2://{user}:{pw}@{url}/{db}'"));
        assert!(models.contains("'<<repr-str> {}>'"));
    }
}
