//! Font resolution: explicit file, then named system fonts in order, then the built-in
//! bitmap face. Resolution never fails; each miss is reported through `tracing`.

use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use fontdb::{Database, FaceInfo, Source};

use crate::raster::paint::{GLYPH_HEIGHT, GLYPH_WIDTH};

pub const DEFAULT_FONT_SIZE: u32 = 38;

/// System font file names tried, in order, when no explicit font loads.
pub const DEFAULT_FONT_CANDIDATES: &[&str] = &[
    "msyhl.ttc",
    "SourceHanSansSC-Light.otf",
    "msyh.ttc",
    "simsun.ttc",
    "STHeiti Light.ttc",
];

/// Where a resolved font came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontOrigin {
    Explicit(PathBuf),
    System { name: String, path: PathBuf },
    BuiltIn,
}

/// A font file on disk and the face to use inside it (non-zero only for collections).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontLocation {
    pub path: PathBuf,
    pub index: u32,
}

/// A font ready for measuring and drawing.
pub enum LabelFont {
    Outline {
        font: FontVec,
        scale: PxScale,
        origin: FontOrigin,
    },
    /// Built-in 5x7 face, each dot drawn as a `scale` x `scale` block.
    Bitmap { scale: u32 },
}

impl LabelFont {
    /// The built-in face sized to roughly match `size` pixels.
    pub fn builtin(size: u32) -> Self {
        LabelFont::Bitmap {
            scale: (size / (GLYPH_HEIGHT as u32 + 1)).max(1),
        }
    }

    pub fn origin(&self) -> FontOrigin {
        match self {
            LabelFont::Outline { origin, .. } => origin.clone(),
            LabelFont::Bitmap { .. } => FontOrigin::BuiltIn,
        }
    }

    /// Rendered `(width, height)` of `text` in pixels.
    pub fn measure(&self, text: &str) -> (u32, u32) {
        match self {
            LabelFont::Outline { font, scale, .. } => {
                imageproc::drawing::text_size(*scale, font, text)
            }
            LabelFont::Bitmap { scale } => {
                let advance = (GLYPH_WIDTH as u32 + 1) * scale;
                let chars = text.chars().count() as u32;
                (chars * advance, GLYPH_HEIGHT as u32 * scale)
            }
        }
    }
}

/// Looks up fonts by file name in a `fontdb` database of installed and extra fonts.
///
/// The database is built on demand, after the explicit font (if any) fails to load.
#[derive(Debug, Clone, Default)]
pub struct FontResolver {
    system_fonts: bool,
    font_dirs: Vec<PathBuf>,
}

impl FontResolver {
    /// Resolver over the fonts installed on this machine.
    pub fn system() -> Self {
        Self {
            system_fonts: true,
            font_dirs: Vec::new(),
        }
    }

    /// Resolver over `font_dirs` only (searched recursively), ignoring installed fonts.
    pub fn with_dirs(font_dirs: Vec<PathBuf>) -> Self {
        Self {
            system_fonts: false,
            font_dirs,
        }
    }

    /// Load every face this resolver can see.
    pub fn database(&self) -> Database {
        let mut db = Database::new();
        if self.system_fonts {
            db.load_system_fonts();
        }
        for dir in &self.font_dirs {
            db.load_fonts_dir(dir);
        }
        tracing::debug!(faces = db.len(), dirs = self.font_dirs.len(), "font database loaded");
        db
    }

    /// Resolve a font at `size` px, degrading to the built-in face.
    pub fn resolve(&self, explicit: Option<&Path>, candidates: &[String], size: u32) -> LabelFont {
        let scale = PxScale::from(size as f32);

        if let Some(path) = explicit {
            match load_font(path, 0) {
                Some(font) => {
                    return LabelFont::Outline {
                        font,
                        scale,
                        origin: FontOrigin::Explicit(path.to_path_buf()),
                    };
                }
                None => tracing::warn!(path = %path.display(), "font file unusable, trying system fonts"),
            }
        }

        if !candidates.is_empty() {
            let db = self.database();
            for name in candidates {
                let Some(location) = locate_in(&db, name) else {
                    tracing::debug!(font = %name, "system font not found");
                    continue;
                };
                match load_font(&location.path, location.index) {
                    Some(font) => {
                        return LabelFont::Outline {
                            font,
                            scale,
                            origin: FontOrigin::System {
                                name: name.clone(),
                                path: location.path,
                            },
                        };
                    }
                    None => tracing::warn!(
                        font = %name,
                        path = %location.path.display(),
                        "system font unusable"
                    ),
                }
            }
        }

        tracing::warn!("no usable font found, using built-in bitmap font");
        LabelFont::builtin(size)
    }

    /// Find a font file by name: a direct path first, then the faces in [`Self::database`].
    pub fn locate(&self, name: &str) -> Option<FontLocation> {
        locate_in(&self.database(), name)
    }
}

fn locate_in(db: &Database, name: &str) -> Option<FontLocation> {
    let direct = Path::new(name);
    if direct.is_file() {
        return Some(FontLocation {
            path: direct.to_path_buf(),
            index: 0,
        });
    }
    // First file in load order wins; within a collection, its first face.
    db.faces()
        .filter_map(|face| face_path(face).map(|path| (path, face.index)))
        .filter(|(path, _)| {
            path.file_name()
                .and_then(|file| file.to_str())
                .is_some_and(|file| file.eq_ignore_ascii_case(name))
        })
        .min_by_key(|(_, index)| *index)
        .map(|(path, index)| FontLocation {
            path: path.to_path_buf(),
            index,
        })
}

fn face_path(face: &FaceInfo) -> Option<&Path> {
    match &face.source {
        Source::File(path) | Source::SharedFile(path, _) => Some(path.as_path()),
        Source::Binary(_) => None,
    }
}

fn load_font(path: &Path, index: u32) -> Option<FontVec> {
    let bytes = fs::read(path).ok()?;
    FontVec::try_from_vec_and_index(bytes, index).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/DejaVuSansMono.ttf");

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn install(dir: &Path, name: &str) -> PathBuf {
        fs::create_dir_all(dir).unwrap();
        let path = dir.join(name);
        fs::copy(FIXTURE, &path).unwrap();
        path
    }

    #[test]
    fn falls_back_to_builtin_when_nothing_loads() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("broken.ttf");
        fs::write(&bogus, b"not a font").unwrap();

        let resolver = FontResolver::with_dirs(vec![dir.path().to_path_buf()]);
        let font = resolver.resolve(
            Some(&bogus),
            &names(&["broken.ttf", "missing.ttc"]),
            38,
        );
        assert_eq!(font.origin(), FontOrigin::BuiltIn);
        assert!(matches!(font, LabelFont::Bitmap { scale: 4 }));
    }

    #[test]
    fn locates_deeply_nested_fonts_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c/d/e/f");
        let path = install(&nested, "msyh.ttc");

        let resolver = FontResolver::with_dirs(vec![dir.path().to_path_buf()]);
        assert_eq!(
            resolver.locate("MSYH.TTC"),
            Some(FontLocation { path, index: 0 })
        );
        assert_eq!(resolver.locate("simsun.ttc"), None);

        let font = resolver.resolve(None, &names(&["msyh.ttc"]), 38);
        assert!(matches!(font.origin(), FontOrigin::System { ref name, .. } if name == "msyh.ttc"));
    }

    #[test]
    fn explicit_path_beats_candidates() {
        let dir = tempfile::tempdir().unwrap();
        install(dir.path(), "one.ttf");
        let explicit = install(&dir.path().join("custom"), "two.ttf");

        let resolver = FontResolver::with_dirs(vec![dir.path().to_path_buf()]);
        let font = resolver.resolve(Some(&explicit), &names(&["one.ttf"]), 38);
        assert_eq!(font.origin(), FontOrigin::Explicit(explicit));
    }

    #[test]
    fn first_loadable_candidate_wins() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.ttf"), b"not a font").unwrap();
        install(dir.path(), "one.ttf");
        install(dir.path(), "two.ttf");

        let resolver = FontResolver::with_dirs(vec![dir.path().to_path_buf()]);
        let font = resolver.resolve(
            Some(Path::new("/nonexistent/font.ttf")),
            &names(&["missing.ttc", "broken.ttf", "one.ttf", "two.ttf"]),
            38,
        );
        match font.origin() {
            FontOrigin::System { name, path } => {
                assert_eq!(name, "one.ttf");
                assert!(path.ends_with("one.ttf"));
            }
            other => panic!("expected a system font, got {other:?}"),
        }
    }

    #[test]
    fn outline_measure_grows_with_text() {
        let font = FontResolver::default().resolve(Some(Path::new(FIXTURE)), &[], 38);
        let (short, height) = font.measure("ab");
        let (long, _) = font.measure("abcd");
        assert!(height > 0);
        assert!(long > short);
    }

    #[test]
    fn bitmap_measure_scales_with_size() {
        let font = LabelFont::builtin(16);
        assert_eq!(font.measure("AB"), (2 * 6 * 2, 14));
        assert_eq!(LabelFont::builtin(1).measure(""), (0, 7));
    }
}
