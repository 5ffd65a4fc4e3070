//! Add missing features to the annotation.

use super::{Diagnostic, SyncOptions, SyncReport, apply, finish};
use crate::compat::CompatData;
use crate::config::SyncConfig;
use crate::edit::{create_annotation, find_annotation, insert_values, list_values};
use crate::error::{Error, Result};
use crate::parser::{Interface, single_identifier};
use crate::project::{Corpus, DeclarationIndex, MemberIndex};
use rustc_hash::FxHashSet;
use tracing::{debug, info};

/// Compat interfaces the target engine lacks while a reference engine ships
/// them, in name order
pub fn missing_interfaces(data: &CompatData, config: &SyncConfig) -> Vec<String> {
    data.api
        .iter()
        .filter(|(name, _)| !config.is_skipped(name))
        .filter(|(_, feature)| {
            feature
                .support()
                .is_some_and(|s| config.engines.lacks_only_target_engine_support(s))
        })
        .map(|(name, _)| name.clone())
        .collect()
}

/// Add every missing interface to the global interface's annotation, then
/// (if enabled) missing members to other annotated interfaces.
pub fn add_unsupported(
    options: &SyncOptions,
    data: &CompatData,
    config: &SyncConfig,
) -> Result<SyncReport> {
    let candidates = missing_interfaces(data, config);
    info!(count = candidates.len(), "interfaces missing only in the target engine");

    let mut corpus = Corpus::load(&options.corpus)?;
    let mut report = SyncReport::new(options.dry_run);
    report.note_skipped(corpus.skipped());
    let index = corpus.load_all_declarations();

    instrument_global(&mut corpus, &index, &candidates, config, &mut report)?;
    if config.instrument_members {
        let declared = corpus.declared_members();
        instrument_members(&mut corpus, &index, &declared, data, config, &mut report)?;
    }

    finish(&corpus, &mut report, options, config)?;
    Ok(report)
}

/// `Exposed=*` counts as every global; no `Exposed` counts as none
fn is_exposed_on(iface: &Interface, globals: &[String]) -> bool {
    iface
        .exposed_globals()
        .is_some_and(|exposed| exposed.iter().any(|g| g == "*" || globals.contains(g)))
}

fn instrument_global(
    corpus: &mut Corpus,
    index: &DeclarationIndex,
    candidates: &[String],
    config: &SyncConfig,
    report: &mut SyncReport,
) -> Result<()> {
    let global = config.global_interface.as_str();
    let missing = || Error::MissingInterface {
        name: global.to_string(),
    };
    let id = index.get(global).map(|(id, _)| *id).ok_or_else(missing)?;
    let decl = corpus.current_interface(id, global).ok_or_else(missing)?;
    let path = corpus.path(id).map(|p| p.to_path_buf()).unwrap_or_default();

    let annotation = find_annotation(&decl, &config.annotation);
    let present = match annotation.as_ref().map(list_values).transpose() {
        Ok(values) => values.unwrap_or_default(),
        Err(e) => {
            report.push(Diagnostic::warning(e.to_string()).in_file(path).on_interface(global));
            return Ok(());
        }
    };
    let present: FxHashSet<&str> = present.iter().map(String::as_str).collect();

    let mut to_add = Vec::new();
    for name in candidates {
        if present.contains(name.as_str()) {
            continue;
        }
        let defined = index.get(name).map(|(_, iface)| iface);
        if defined.is_some_and(|iface| !is_exposed_on(iface, &config.exposure_globals)) {
            debug!(name, "not exposed on the global");
            report.push(
                Diagnostic::info(format!(
                    "skipped, not exposed on {}",
                    config.exposure_globals.join(", ")
                ))
                .on_interface(name),
            );
            continue;
        }
        if single_identifier(name).is_none() {
            report.push(Diagnostic::warning("skipped, not an identifier").on_interface(name));
            continue;
        }
        to_add.push(name.clone());
    }
    if to_add.is_empty() {
        return Ok(());
    }

    let edit = match &annotation {
        Some(attr) => insert_values(attr, &to_add)?,
        None => Some(create_annotation(&decl, &config.annotation, &to_add)?),
    };
    if let Some(edit) = edit {
        info!(interface = global, count = edit.values.len(), "adding to annotation");
        report.added.insert(global.to_string(), edit.values.clone());
        apply(corpus, id, edit);
    }
    Ok(())
}

fn instrument_members(
    corpus: &mut Corpus,
    index: &DeclarationIndex,
    declared: &MemberIndex,
    data: &CompatData,
    config: &SyncConfig,
    report: &mut SyncReport,
) -> Result<()> {
    for (name, (id, _)) in index {
        if *name == config.global_interface {
            continue;
        }
        let Some(decl) = corpus.current_interface(*id, name) else {
            continue;
        };
        let Some(attr) = find_annotation(&decl, &config.annotation) else {
            continue;
        };
        let Some(feature) = data.interface(config.data_name(name)) else {
            debug!(name, "no compat entry");
            continue;
        };
        let path = corpus.path(*id).map(|p| p.to_path_buf()).unwrap_or_default();
        if decl.has_indexed_or_named_getter() {
            report.push(
                Diagnostic::info("skipped, has an indexed or named getter")
                    .in_file(path)
                    .on_interface(name.as_str()),
            );
            continue;
        }
        let existing = match list_values(&attr) {
            Ok(values) => values,
            Err(e) => {
                report.push(
                    Diagnostic::warning(e.to_string())
                        .in_file(path)
                        .on_interface(name.as_str()),
                );
                continue;
            }
        };
        let declared = declared.get(name);

        let missing: Vec<&str> = feature
            .subfeatures
            .iter()
            .filter(|(member, _)| {
                *member != name
                    && !config.is_ignored_subfeature(member)
                    && single_identifier(member).is_some()
                    && !existing.iter().any(|e| e == *member)
                    && !declared.is_some_and(|d| d.contains(member.as_str()))
            })
            .filter(|(_, sub)| {
                sub.support()
                    .is_some_and(|s| config.engines.lacks_only_target_engine_support(s))
            })
            .map(|(member, _)| member.as_str())
            .collect();
        if missing.is_empty() {
            continue;
        }

        if let Some(edit) = insert_values(&attr, &missing)? {
            info!(interface = %name, count = edit.values.len(), "adding members to annotation");
            report.added.insert(name.clone(), edit.values.clone());
            apply(corpus, *id, edit);
        }
    }
    Ok(())
}
