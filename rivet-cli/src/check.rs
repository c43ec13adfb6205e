use std::{fmt, fs, time::Instant};

use anstream::println;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use rivet_core::{Mounter, ParseError, Props, Refs};
use scraper::{ElementRef, Html};

use crate::{
    config::{Config, CONFIG_FILE},
    shell,
    shell::{DIM, HEADING},
    util::*,
};

/// Runs mount passes over HTML files, the way the page would in a browser.
#[derive(Clone, Debug)]
pub struct Checker {
    pub config: Config,
    pub config_path: Option<Utf8PathBuf>,
    mounter: Mounter,
}

/// One mounted element.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MountReport {
    pub name: String,
    pub tag: String,
    /// Number of top-level keys, or `None` when the props are not an object.
    pub props_keys: Option<usize>,
    pub refs: Vec<RefReport>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RefReport {
    pub key: String,
    pub tags: Vec<String>,
}

impl Checker {
    pub fn new(config: Config) -> Self {
        let mounter = Mounter::with_attributes(config.attributes.clone());
        Self {
            config,
            config_path: None,
            mounter,
        }
    }

    /// Loads `config_path`, or `rivet.toml` from the working directory when it exists.
    pub fn from_env(config_path: Option<&Utf8Path>) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => Some(path.to_owned()),
            None => Some(Utf8PathBuf::from(CONFIG_FILE)).filter(|path| path.is_file()),
        };

        let config = match &config_path {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        Ok(Self {
            config_path,
            ..Self::new(config)
        })
    }

    // Commands

    pub fn check(&self, files: &[Utf8PathBuf], name: Option<&str>) -> Result<()> {
        let start = Instant::now();
        let mut mounted = 0;
        let mut failed = 0;

        for path in files {
            shell().progress("Checking", path);
            match self.check_file(path, name) {
                Ok(reports) => {
                    for report in &reports {
                        shell().status("Mounted", format!("{report} in {path}"));
                    }
                    mounted += reports.len();
                }
                Err(err) => {
                    shell().error(format!("{err:#}"));
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            return Err(CheckFailed { files: failed }.into());
        }

        shell().status(
            "Finished",
            format!(
                "{} in {} ({})",
                Count(mounted, "mount point"),
                Count(files.len(), "file"),
                Elapsed(start.elapsed())
            ),
        );
        Ok(())
    }

    pub fn refs(&self, path: &Utf8Path, name: &str) -> Result<()> {
        let reports = self.check_file(path, Some(name))?;
        if reports.is_empty() {
            shell().warn(format!("no `{name}` mount points in {path}"));
        }

        for report in reports {
            println!("{HEADING}{}{HEADING:#} <{}>", report.name, report.tag);
            if report.refs.is_empty() {
                println!("  {DIM}(no refs){DIM:#}");
            }
            for r in report.refs {
                println!("  {}: {}", r.key, r.tags.join(", "));
            }
        }
        Ok(())
    }

    // Utilities

    pub fn check_file(&self, path: &Utf8Path, name: Option<&str>) -> Result<Vec<MountReport>> {
        let source =
            fs::read_to_string(path).with_context(|| format!("failed to read `{path}`"))?;
        self.check_source(&source, name)
            .with_context(|| format!("failed to mount `{path}`"))
    }

    /// Mounts `name`, or every mount point when `None`, in parsed markup.
    pub fn check_source(
        &self,
        source: &str,
        name: Option<&str>,
    ) -> Result<Vec<MountReport>, ParseError> {
        let html = Html::parse_document(source);
        let mut reports = vec![];

        match name {
            Some(name) => self.mounter.mount(&&html, name, |element, props, refs| {
                reports.push(MountReport::new(name, element, &props, &refs));
            })?,
            None => self.mounter.mount_all(&&html, |name, element, props, refs| {
                reports.push(MountReport::new(name, element, &props, &refs));
            })?,
        };
        Ok(reports)
    }
}

impl MountReport {
    fn new(name: &str, element: ElementRef, props: &Props, refs: &Refs<ElementRef>) -> Self {
        let refs = refs
            .iter()
            .map(|(key, value)| RefReport {
                key: key.clone(),
                tags: value.iter().map(|el| el.value().name().to_string()).collect(),
            })
            .collect();

        Self {
            name: name.to_string(),
            tag: element.value().name().to_string(),
            props_keys: props.as_object().map(|props| props.len()),
            refs,
        }
    }
}

/// `search <form> (props: 1 key, refs: query, item[3])`
impl fmt::Display for MountReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> (props: ", self.name, self.tag)?;
        match self.props_keys {
            Some(n) => write!(f, "{}", Count(n, "key"))?,
            None => f.write_str("not an object")?,
        }

        f.write_str(", refs: ")?;
        if self.refs.is_empty() {
            f.write_str("none")?;
        }
        for (i, r) in self.refs.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match r.tags.len() {
                1 => f.write_str(&r.key)?,
                n => write!(f, "{}[{n}]", r.key)?,
            }
        }
        f.write_str(")")
    }
}
