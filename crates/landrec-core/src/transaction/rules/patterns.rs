//! Regex patterns for registration-office transaction sections.
//!
//! Label sources pair the English template wording with the Tamil wording
//! used on untranslated certificates. They are combined into full label
//! regexes by the rule table.

use lazy_static::lazy_static;
use regex::Regex;

// Field labels (regex sources, no separator)
pub const SERIAL_NUMBER_LABEL: &str = r"\bS(?:r|l|erial)\.?[ \t]*No\.?|வ\.?[ \t]*எண்";
pub const DOCUMENT_NUMBER_LABEL: &str = r"\bDoc(?:ument)?\.?[ \t]*No\.?|ஆவண[ \t]*எண்";
pub const EXECUTION_DATE_LABEL: &str =
    r"\bExecution[ \t]+Date|\bDate[ \t]+of[ \t]+Execution|எழுதி(?:க்)?[ \t]*கொடுத்த[ \t]*(?:நாள்|தேதி)";
pub const PRESENTATION_DATE_LABEL: &str =
    r"\bPresentation[ \t]+Date|\bDate[ \t]+of[ \t]+Presentation|தாக்கல்[ \t]*(?:நாள்|தேதி)";
pub const REGISTRATION_DATE_LABEL: &str =
    r"\bRegistration[ \t]+Date|\bDate[ \t]+of[ \t]+Registration|பதிவு[ \t]*(?:நாள்|தேதி)";
pub const NATURE_LABEL: &str =
    r"\bNature(?:[ \t]+of[ \t]+(?:Document|Transaction))?|(?:ஆவணத்தின்[ \t]*)?தன்மை";
pub const EXECUTANTS_LABEL: &str =
    r"\bExecutant(?:s|\(s\))?|எழுதி(?:க்)?[ \t]*கொடுத்தவர்(?:கள்)?";
pub const CLAIMANTS_LABEL: &str = r"\bClaimant(?:s|\(s\))?|எழுதி[ \t]*வாங்கியவர்(?:கள்)?";
pub const VOLUME_NUMBER_LABEL: &str = r"\bVol(?:ume)?\.?[ \t]*No\.?|தொகுதி[ \t]*எண்";
pub const PAGE_NUMBER_LABEL: &str = r"\bPage[ \t]*No\.?|பக்க[ \t]*எண்";
pub const CONSIDERATION_VALUE_LABEL: &str =
    r"\bConsideration(?:[ \t]+Value)?|கைமாற்று(?:த்)?[ \t]*தொகை";
pub const MARKET_VALUE_LABEL: &str = r"\bMarket[ \t]+Value|சந்தை[ \t]*மதிப்பு";
pub const PR_NUMBER_LABEL: &str = r"\bPR[ \t]*(?:Number|No\.?)";
pub const DOCUMENT_REMARKS_LABEL: &str = r"\bDocument[ \t]+Remarks";
pub const PROPERTY_TYPE_LABEL: &str = r"\bProperty[ \t]+Type|சொத்தின்[ \t]*வகை";
pub const PROPERTY_EXTENT_LABEL: &str = r"\bProperty[ \t]+Extent|சொத்தின்[ \t]*பரப்பு";
pub const VILLAGE_LABEL: &str = r"\bVillage|கிராமம்";
pub const STREET_LABEL: &str = r"\bStreet|தெரு";
pub const SURVEY_NUMBERS_LABEL: &str = r"\bSurvey[ \t]*No(?:s\.?|\.)?|புல[ \t]*எண்(?:கள்)?";
pub const PLOT_NUMBER_LABEL: &str = r"\bPlot[ \t]*No\.?|மனை[ \t]*எண்";
pub const SCHEDULE_REMARKS_LABEL: &str = r"\bSchedule[ \t]+Remarks";

lazy_static! {
    // Start of a transaction: a serial-number label at the start of a line
    pub static ref SECTION_MARKER: Regex = Regex::new(
        r"(?im)^[ \t]*(?:S(?:r|l|erial)\.?[ \t]*No(?:\.|\b)|வ\.?[ \t]*எண்)"
    ).unwrap();

    // Ordinal markers in party lists: "1.", "2 ."
    pub static ref ORDINAL_MARKER: Regex = Regex::new(
        r"(?:^|\s)\d{1,3}[ \t]*\."
    ).unwrap();

    // Numeric dates: 15-03-2019, 15/03/2019, 15.03.19
    pub static ref DATE_DMY: Regex = Regex::new(
        r"\b(\d{1,2})[./\-](\d{1,2})[./\-](\d{4}|\d{2})\b"
    ).unwrap();

    // ISO-style dates: 2019-03-15
    pub static ref DATE_YMD: Regex = Regex::new(
        r"\b(\d{4})[./\-](\d{1,2})[./\-](\d{1,2})\b"
    ).unwrap();

    // Abbreviated month dates: 15-Mar-2019, 15 March 2019
    pub static ref DATE_DAY_MONTH_NAME: Regex = Regex::new(
        r"(?i)\b(\d{1,2})[ \-./]*(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?[ \-./]*(\d{4}|\d{2})\b"
    ).unwrap();

    // Currency markers preceding an amount
    pub static ref CURRENCY_PREFIX: Regex = Regex::new(
        r"(?i)^(?:rs\.?|inr|₹|ரூ\.?)[ \t]*"
    ).unwrap();

    // Whitespace runs, collapsed inside multi-line names
    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}
