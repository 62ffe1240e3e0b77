//! Engine library catalog.
//!
//! Maps the implementation-selecting `#define` macros of the
//! olcPixelGameEngine family to the prebuilt object files added to the link
//! stage. The table is fixed at process start and shared read-only across
//! requests; defines that are not in the table are never special-cased.

/// A prebuilt engine module selectable from user source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Library {
    /// The core engine, `OLC_PGE_APPLICATION`.
    PixelGameEngine,
    /// The sound engine, `OLC_SOUNDWAVE_ENGINE`.
    SoundWaveEngine,
    Graphics2d,
    Graphics3d,
    PopUpMenu,
    QuickGui,
    RayCastWorld,
    Sound,
    SplashScreen,
    TransformedView,
    Wireframe,
}

impl Library {
    /// Every supported engine module, in matching order.
    pub const ALL: [Library; 11] = [
        Library::PixelGameEngine,
        Library::SoundWaveEngine,
        Library::Graphics2d,
        Library::Graphics3d,
        Library::PopUpMenu,
        Library::QuickGui,
        Library::RayCastWorld,
        Library::Sound,
        Library::SplashScreen,
        Library::TransformedView,
        Library::Wireframe,
    ];

    /// The `#define` name that selects this module.
    pub fn macro_name(self) -> &'static str {
        match self {
            Library::PixelGameEngine => "OLC_PGE_APPLICATION",
            Library::SoundWaveEngine => "OLC_SOUNDWAVE_ENGINE",
            Library::Graphics2d => "OLC_PGEX_GRAPHICS2D",
            Library::Graphics3d => "OLC_PGEX_GRAPHICS3D",
            Library::PopUpMenu => "OLC_PGEX_POPUPMENU",
            Library::QuickGui => "OLC_PGEX_QUICKGUI",
            Library::RayCastWorld => "OLC_PGEX_RAYCASTWORLD",
            Library::Sound => "OLC_PGEX_SOUND",
            Library::SplashScreen => "OLC_PGEX_SPLASHSCREEN",
            Library::TransformedView => "OLC_PGEX_TRANSFORMEDVIEW",
            Library::Wireframe => "OLC_PGEX_WIREFRAME",
        }
    }

    /// The prebuilt object file linked in for this module.
    pub fn object_file(self) -> &'static str {
        match self {
            Library::PixelGameEngine => "olcPixelGameEngine.o",
            Library::SoundWaveEngine => "olcSoundWaveEngine.o",
            Library::Graphics2d => "olcPGEX_Graphics2D.o",
            Library::Graphics3d => "olcPGEX_Graphics3D.o",
            Library::PopUpMenu => "olcPGEX_PopUpMenu.o",
            Library::QuickGui => "olcPGEX_QuickGUI.o",
            Library::RayCastWorld => "olcPGEX_RayCastWorld.o",
            Library::Sound => "olcPGEX_Sound.o",
            Library::SplashScreen => "olcPGEX_SplashScreen.o",
            Library::TransformedView => "olcPGEX_TransformedView.o",
            Library::Wireframe => "olcPGEX_Wireframe.o",
        }
    }

    /// Match a `#define` line against the catalog.
    ///
    /// Substring match; the first catalog entry found on the line wins.
    pub fn detect(line: &str) -> Option<Library> {
        Library::ALL
            .into_iter()
            .find(|library| line.contains(library.macro_name()))
    }
}

/// Object files for a selection set, deduplicated in first-seen order.
///
/// The same macro defined twice must not put the same object on the link
/// command line twice.
pub fn resolve_objects(selected: &[Library]) -> Vec<&'static str> {
    let mut objects: Vec<&'static str> = Vec::new();
    for library in selected {
        let object = library.object_file();
        if !objects.contains(&object) {
            objects.push(object);
        }
    }
    objects
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_table() {
        assert_eq!(Library::PixelGameEngine.macro_name(), "OLC_PGE_APPLICATION");
        assert_eq!(Library::PixelGameEngine.object_file(), "olcPixelGameEngine.o");
        assert_eq!(Library::QuickGui.macro_name(), "OLC_PGEX_QUICKGUI");
        assert_eq!(Library::QuickGui.object_file(), "olcPGEX_QuickGUI.o");
        assert_eq!(Library::ALL.len(), 11);
    }

    #[test]
    fn test_detect_matches_substring() {
        assert_eq!(
            Library::detect("#define OLC_PGE_APPLICATION"),
            Some(Library::PixelGameEngine)
        );
        assert_eq!(
            Library::detect("  #define   OLC_PGEX_WIREFRAME // trailing"),
            Some(Library::Wireframe)
        );
        assert_eq!(Library::detect("#define MY_OWN_MACRO 1"), None);
    }

    #[test]
    fn test_resolve_objects_keeps_order() {
        let objects = resolve_objects(&[Library::SoundWaveEngine, Library::PixelGameEngine]);
        assert_eq!(objects, vec!["olcSoundWaveEngine.o", "olcPixelGameEngine.o"]);
    }

    #[test]
    fn test_resolve_objects_deduplicates() {
        let objects = resolve_objects(&[
            Library::PixelGameEngine,
            Library::PixelGameEngine,
            Library::Graphics2d,
        ]);
        assert_eq!(objects, vec!["olcPixelGameEngine.o", "olcPGEX_Graphics2D.o"]);
    }
}
