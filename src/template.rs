use regex::{Regex, RegexBuilder};

#[derive(Clone, Debug, Default)]
pub struct Template {
    name: String,
    is_selected: bool,
}

impl Template {
    fn new(name: String) -> Self {
        Self {
            name,
            is_selected: false,
        }
    }
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
    pub fn is_selected(&self) -> bool {
        self.is_selected
    }
}

/// Selection state for the catalog, kept in catalog order.
#[derive(Clone, Debug, Default)]
pub struct Templates {
    options: Vec<Template>,
}

impl Templates {
    pub(crate) fn new() -> Self {
        Self { options: vec![] }
    }
    pub(crate) fn set_list(&mut self, names: Vec<String>) {
        self.options.clear();
        for name in names {
            self.options.push(Template::new(name));
        }
    }
    pub(crate) fn select_template(&mut self, name: &str) {
        self.set_template_selected_flag(name, true);
    }
    pub(crate) fn unselect_template(&mut self, name: &str) {
        self.set_template_selected_flag(name, false);
    }
    pub(crate) fn selected_template_names(&self) -> Vec<String> {
        self.names(|template| template.is_selected())
    }
    /// Unselected names passing `filter`.
    pub(crate) fn available_template_names(&self, filter: &Filter) -> Vec<String> {
        self.names(|template| !template.is_selected() && filter.is_match(template.name()))
    }
    pub(crate) fn any_selected(&self) -> bool {
        self.options.iter().any(|t| t.is_selected())
    }
}
impl Templates {
    fn set_template_selected_flag(&mut self, name: &str, selected: bool) {
        self.options.iter_mut().for_each(|option| {
            if option.name == name {
                option.is_selected = selected;
            }
        });
    }
    fn names(&self, keep: impl Fn(&Template) -> bool) -> Vec<String> {
        self.options
            .iter()
            .filter(|option| keep(option))
            .map(|option| option.name().to_string())
            .collect()
    }
}

/// Case-insensitive literal substring match on template names. Empty text matches everything.
#[derive(Clone, Debug, Default)]
pub(crate) struct Filter {
    re: Option<Regex>,
}

impl Filter {
    pub(crate) fn new(text: &str) -> Result<Self, regex::Error> {
        if text.is_empty() {
            return Ok(Self { re: None });
        }
        let re = RegexBuilder::new(regex::escape(text).as_str())
            .case_insensitive(true)
            .build()?;
        Ok(Self { re: Some(re) })
    }
    pub(crate) fn is_match(&self, name: &str) -> bool {
        self.re.as_ref().map_or(true, |re| re.is_match(name))
    }
}
