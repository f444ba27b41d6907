#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    CatalogGet,

    PhrasesList,
    PhrasesLoad,
    PhrasesAdd,
    PhrasesUpdate,
    PhrasesSetTranslation,
    PhrasesDelete,

    EditBegin,
    EditCommit,
    EditCancel,

    FilterSet,
    FilterGet,

    ViewGet,
    ViewSort,
    ViewPage,
    ViewPageSize,

    SelectionToggle,
    SelectionSelectAll,
    SelectionClear,
    SelectionBulkDelete,

    ExpandToggle,
    LookupBegin,
    LookupFinish,

    QaRun,
    ExchangeExport,
    ExchangeImport,
    EncodingDetect,

    CulturesList,
    CulturesMove,
    CulturesAdd,
    CulturesEdit,
    CulturesSave,
    CulturesCancel,
    CulturesDelete,

    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s {
            "ping" => Command::Ping,
            "catalog.get" => Command::CatalogGet,

            "phrases.list" => Command::PhrasesList,
            "phrases.load" => Command::PhrasesLoad,
            "phrases.add" => Command::PhrasesAdd,
            "phrases.update" => Command::PhrasesUpdate,
            "phrases.set_translation" => Command::PhrasesSetTranslation,
            "phrases.delete" => Command::PhrasesDelete,

            "edit.begin" => Command::EditBegin,
            "edit.commit" => Command::EditCommit,
            "edit.cancel" => Command::EditCancel,

            "filter.set" => Command::FilterSet,
            "filter.get" => Command::FilterGet,

            "view.get" => Command::ViewGet,
            "view.sort" => Command::ViewSort,
            "view.page" => Command::ViewPage,
            "view.page_size" => Command::ViewPageSize,

            "selection.toggle" => Command::SelectionToggle,
            "selection.select_all" => Command::SelectionSelectAll,
            "selection.clear" => Command::SelectionClear,
            "selection.bulk_delete" => Command::SelectionBulkDelete,

            "expand.toggle" => Command::ExpandToggle,
            "lookup.begin" => Command::LookupBegin,
            "lookup.finish" => Command::LookupFinish,

            "qa.run" => Command::QaRun,
            "exchange.export" => Command::ExchangeExport,
            "exchange.import" => Command::ExchangeImport,
            "encoding.detect" => Command::EncodingDetect,

            "cultures.list" => Command::CulturesList,
            "cultures.move" => Command::CulturesMove,
            "cultures.add" => Command::CulturesAdd,
            "cultures.edit" => Command::CulturesEdit,
            "cultures.save" => Command::CulturesSave,
            "cultures.cancel" => Command::CulturesCancel,
            "cultures.delete" => Command::CulturesDelete,

            _ => Command::Unknown,
        }
    }
}
