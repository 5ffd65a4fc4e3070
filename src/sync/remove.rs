//! Remove values the target engine now ships everywhere.

use super::{Diagnostic, SyncOptions, SyncReport, apply, finish};
use crate::compat::{CompatData, Feature};
use crate::config::SyncConfig;
use crate::edit::{find_annotation, list_values, remove_values};
use crate::error::Result;
use crate::project::Corpus;
use std::collections::BTreeMap;
use tracing::info;

pub fn remove_supported(
    options: &SyncOptions,
    data: &CompatData,
    config: &SyncConfig,
) -> Result<SyncReport> {
    let mut corpus = Corpus::load(&options.corpus)?;
    let mut report = SyncReport::new(options.dry_run);
    report.note_skipped(corpus.skipped());
    let index = corpus.load_all_declarations();

    for (name, (id, _)) in &index {
        let Some(decl) = corpus.current_interface(*id, name) else {
            continue;
        };
        let Some(attr) = find_annotation(&decl, &config.annotation) else {
            continue;
        };
        let values = match list_values(&attr) {
            Ok(values) => values,
            Err(e) => {
                let path = corpus.path(*id).map(|p| p.to_path_buf()).unwrap_or_default();
                report.push(
                    Diagnostic::warning(e.to_string())
                        .in_file(path)
                        .on_interface(name.as_str()),
                );
                continue;
            }
        };

        let targets = data_targets(name, data, config);
        let exceptions = config.exceptions_for(name);
        let redundant: Vec<&str> = values
            .iter()
            .map(String::as_str)
            .filter(|value| !exceptions.contains(value))
            .filter(|value| {
                targets
                    .iter()
                    .find_map(|target| target.get(*value))
                    .and_then(Feature::support)
                    .is_some_and(|s| config.engines.supported_by_target_engine_everywhere(s))
            })
            .collect();
        if redundant.is_empty() {
            continue;
        }

        if let Some(edit) = remove_values(&attr, &redundant)? {
            info!(interface = %name, count = edit.values.len(), "removing from annotation");
            report.removed.insert(name.clone(), edit.values.clone());
            apply(&mut corpus, *id, edit);
        }
    }

    finish(&corpus, &mut report, options, config)?;
    Ok(report)
}

/// Feature maps a value of `interface`'s annotation is looked up in, in
/// priority order. The global interface also lists whole interfaces and
/// JavaScript builtins.
fn data_targets<'a>(
    interface: &str,
    data: &'a CompatData,
    config: &SyncConfig,
) -> Vec<&'a BTreeMap<String, Feature>> {
    let mut targets = Vec::new();
    if let Some(feature) = data.interface(config.data_name(interface)) {
        targets.push(&feature.subfeatures);
    }
    if interface == config.global_interface {
        targets.push(&data.api);
        targets.push(&data.javascript.builtins);
    }
    targets
}
