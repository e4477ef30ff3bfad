//! Expands (location, name, profile, extension) tuples into concrete
//! candidate resource locations.

use std::path::Path;

use crate::env::location::Location;
use crate::env::profile::Profile;

/// Which document filter(s) apply to a candidate's parsed documents.
///
/// A profile-specific file (`application-dev.yml`) may contain both documents
/// that belong to the null/default bucket and documents that declare the
/// profile explicitly (in a multi-document file); such candidates are tried
/// against both filters. A plain base file (`application.yml`) loaded while
/// processing a named profile is only tried against that profile's filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateFilters {
    /// Only the null-profile (default) filter applies.
    Default,
    /// Only the named profile's filter applies.
    Profile,
    /// Both the null-profile filter and the named profile's filter apply.
    Both,
}

/// One candidate physical resource to attempt, and which filter(s) its
/// documents should be tested against once parsed.
#[derive(Debug, Clone)]
pub struct FileCandidate {
    pub location: String,
    pub filters: CandidateFilters,
}

/// Expands search locations and names into ordered file candidates for one
/// profile pass.
///
/// `processed_non_null` is the set of profiles already popped from the
/// work-list and fully processed, in processing order - used to pull in data
/// from earlier profile-specific files a later profile may depend on.
pub struct FileExpander;

impl FileExpander {
    pub fn expand(
        locations: &[Location],
        names: &[String],
        profile: Option<&Profile>,
        processed_non_null: &[Profile],
        extensions: &[String],
    ) -> Vec<FileCandidate> {
        let mut candidates = Vec::new();
        for location in locations {
            match location {
                Location::File(raw) => {
                    if let Some(ext) = file_extension(raw) {
                        if extensions.iter().any(|known| known == ext) {
                            candidates.push(FileCandidate {
                                location: raw.clone(),
                                filters: match profile {
                                    None => CandidateFilters::Default,
                                    Some(_) => CandidateFilters::Profile,
                                },
                            });
                        }
                    }
                },
                Location::Folder(raw) => {
                    for name in names {
                        let prefix = format!("{}{}", raw, name);
                        for ext in extensions {
                            Self::expand_folder_candidates(
                                &mut candidates,
                                &prefix,
                                ext,
                                profile,
                                processed_non_null,
                            );
                        }
                    }
                },
            }
        }
        candidates
    }

    fn expand_folder_candidates(
        candidates: &mut Vec<FileCandidate>,
        prefix: &str,
        ext: &str,
        profile: Option<&Profile>,
        processed_non_null: &[Profile],
    ) {
        match profile {
            Some(p) => {
                candidates.push(FileCandidate {
                    location: format!("{}-{}.{}", prefix, p.name(), ext),
                    filters: CandidateFilters::Both,
                });
                for q in processed_non_null {
                    candidates.push(FileCandidate {
                        location: format!("{}-{}.{}", prefix, q.name(), ext),
                        filters: CandidateFilters::Profile,
                    });
                }
                candidates.push(FileCandidate {
                    location: format!("{}.{}", prefix, ext),
                    filters: CandidateFilters::Profile,
                });
            },
            None => {
                candidates.push(FileCandidate {
                    location: format!("{}.{}", prefix, ext),
                    filters: CandidateFilters::Default,
                });
            },
        }
    }
}

fn file_extension(location: &str) -> Option<&str> {
    Path::new(location).extension().and_then(|e| e.to_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec!["application".to_string()]
    }

    fn extensions() -> Vec<String> {
        vec!["yml".to_string(), "json".to_string()]
    }

    #[test]
    fn null_profile_only_emits_base_files() {
        let locations = vec![Location::Folder("file:./".into())];
        let candidates = FileExpander::expand(&locations, &names(), None, &[], &extensions());
        let locs: Vec<&str> = candidates.iter().map(|c| c.location.as_str()).collect();
        assert_eq!(locs, vec!["file:./application.yml", "file:./application.json"]);
        assert!(candidates.iter().all(|c| c.filters == CandidateFilters::Default));
    }

    #[test]
    fn named_profile_emits_profile_suffixed_then_processed_then_base() {
        let locations = vec![Location::Folder("file:./".into())];
        let dev = Profile::new("dev");
        let prod = Profile::new("prod");
        let candidates = FileExpander::expand(
            &locations,
            &names(),
            Some(&dev),
            std::slice::from_ref(&prod),
            &["yml".to_string()],
        );
        let locs: Vec<&str> = candidates.iter().map(|c| c.location.as_str()).collect();
        assert_eq!(
            locs,
            vec![
                "file:./application-dev.yml",
                "file:./application-prod.yml",
                "file:./application.yml",
            ]
        );
        assert_eq!(candidates[0].filters, CandidateFilters::Both);
        assert_eq!(candidates[1].filters, CandidateFilters::Profile);
        assert_eq!(candidates[2].filters, CandidateFilters::Profile);
    }

    #[test]
    fn concrete_file_location_ignores_names_and_uses_its_own_extension() {
        let locations = vec![Location::File("file:./custom.yml".into())];
        let candidates = FileExpander::expand(&locations, &names(), None, &[], &extensions());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].location, "file:./custom.yml");
    }

    #[test]
    fn concrete_file_with_unknown_extension_is_skipped() {
        let locations = vec![Location::File("file:./custom.toml".into())];
        let candidates = FileExpander::expand(&locations, &names(), None, &[], &extensions());
        assert!(candidates.is_empty());
    }
}
