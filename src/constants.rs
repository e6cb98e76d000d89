/// Constants fixing the identifier truncation format.
///
/// External stat pages link by the resulting strings, so none of these can
/// change without breaking published references.
pub mod identifier {
    /// Characters kept from the cleaned, lowercased last name.
    pub const LAST_PREFIX_LEN: usize = 5;
    /// Characters kept from the lowercased first name.
    pub const FIRST_PREFIX_LEN: usize = 2;
    /// Width of the zero-padded numeric suffix.
    pub const SUFFIX_WIDTH: usize = 2;
    /// Suffix value every freshly derived identifier starts from.
    pub const INITIAL_SUFFIX: u32 = 1;
    /// Largest suffix value the 2-digit format can carry.
    pub const MAX_SUFFIX: u32 = 99;
    /// Characters stripped from last names before truncation.
    pub const LAST_NAME_STRIP: [char; 3] = [' ', '.', '\''];
}

/// Default thresholds for the advisory similarity scanner.
pub mod scanner {
    /// Default max Levenshtein distance between candidate last names.
    pub const DEFAULT_LAST_NAME_DISTANCE: usize = 2;
    /// Default max Levenshtein distance between candidate first names.
    pub const DEFAULT_FIRST_NAME_DISTANCE: usize = 2;
}

/// Column names recognized by the CSV transport.
pub mod transport {
    /// Display-name column in raw roster files.
    pub const NAME_COLUMN: &str = "name";
    /// Team-code column in raw roster files.
    pub const TEAM_COLUMN: &str = "team";
    /// Season column in raw roster files.
    pub const SEASON_COLUMN: &str = "season";
    /// Identifier column written by the resolved sink.
    pub const PLAYER_ID_COLUMN: &str = "player_id";
    /// First-name column written by the resolved sink.
    pub const FIRST_NAME_COLUMN: &str = "first_name";
    /// Last-name column written by the resolved sink.
    pub const LAST_NAME_COLUMN: &str = "last_name";
}

/// Messages logged for advisory (non-fatal) conditions.
pub mod messages {
    /// Logged when a display name has no whitespace to split on.
    pub const UNSPLITTABLE_NAME_MSG: &str = "display name has no whitespace; last name left empty";
    /// Logged when the correction overlay matches zero rows.
    pub const NO_CORRECTIONS_MSG: &str = "correction overlay matched no rows";
}
