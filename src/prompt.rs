use crate::error::Error;
use crate::template::{Filter, Templates};
use cursive::{
    align::HAlign,
    event::{Event, EventResult, EventTrigger, Key},
    style::{
        BaseColor, BorderStyle, Color, ColorStyle, Effect, Palette, PaletteColor, PaletteStyle,
        Style,
    },
    theme::Theme,
    traits::*,
    utils::markup::StyledString,
    views::{Dialog, DummyView, LinearLayout, OnEventView, SelectView, TextView},
    Cursive,
};
use log::debug;
use std::io::IsTerminal;

const AVAILABLE_VIEW_NAME: &str = "available";
const SELECTED_VIEW_NAME: &str = "selected";
const FILTER_VIEW_NAME: &str = "filter";
const KEY_HINTS: &str = "Enter: move   Ctrl+S: done   Ctrl+Q: quit   F1: help";

type Callback = Box<dyn FnOnce(&mut Cursive) + Send>;
type CbSink = crossbeam_channel::Sender<Callback>;

/// Asks the user to choose among options.
pub(crate) trait Prompter {
    /// One option, or `None` when the user backs out.
    fn select_one(&mut self, title: &str, options: &[String]) -> Result<Option<String>, Error>;
    /// Any number of options, in the order offered.
    fn select_many(&mut self, title: &str, options: &[String]) -> Result<Vec<String>, Error>;
}

/// Full screen terminal prompts.
pub(crate) struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn select_one(&mut self, title: &str, options: &[String]) -> Result<Option<String>, Error> {
        ensure_terminal()?;
        let mut siv = cursive::default();
        siv.set_theme(theme());
        siv.set_user_data(None::<String>);
        siv.add_global_callback(Event::CtrlChar('q'), Cursive::quit);

        let select_view = SelectView::<String>::new()
            .with_all_str(options.iter().map(String::as_str))
            .on_submit(|siv, choice: &String| {
                siv.set_user_data(Some(choice.clone()));
                siv.quit();
            });
        siv.add_layer(
            Dialog::around(select_view)
                .title(title)
                .h_align(HAlign::Center)
                .button("Cancel", Cursive::quit),
        );
        siv.run();

        let choice = siv.take_user_data::<Option<String>>().flatten();
        debug!("selected {:?}", choice);
        Ok(choice)
    }
    fn select_many(&mut self, title: &str, options: &[String]) -> Result<Vec<String>, Error> {
        ensure_terminal()?;
        let mut siv = cursive::default();
        siv.add_global_callback(Event::CtrlChar('q'), Cursive::quit);
        siv.add_global_callback(Event::CtrlChar('s'), confirm);
        siv.add_global_callback(Event::Key(Key::F1), help);
        let user_data = UserData::new(options, siv.cb_sink().clone());
        siv.set_user_data(user_data);
        siv.set_theme(theme());

        siv.add_fullscreen_layer(event_view(main_layer(title)));
        refresh(&mut siv);
        siv.run();

        let selected = siv
            .take_user_data::<UserData>()
            .filter(|user_data| user_data.confirmed)
            .map(|user_data| user_data.templates.selected_template_names())
            .unwrap_or_default();
        debug!("selected {:?}", selected);
        Ok(selected)
    }
}

fn ensure_terminal() -> Result<(), Error> {
    if std::io::stdin().is_terminal() && std::io::stdout().is_terminal() {
        Ok(())
    } else {
        Err(Error::NotATerminal)
    }
}

struct UserData {
    templates: Templates,
    filter: String,
    new_filter: bool,
    cb_sink: CbSink,
    confirmed: bool,
}

struct Lists {
    filter: String,
    available: Vec<String>,
    selected: Vec<String>,
    new_filter: bool,
}

impl UserData {
    fn new(options: &[String], cb_sink: CbSink) -> Self {
        let mut templates = Templates::new();
        templates.set_list(options.to_vec());
        Self {
            templates,
            filter: String::default(),
            new_filter: false,
            cb_sink,
            confirmed: false,
        }
    }
    fn edit_filter(&mut self, edit: impl FnOnce(&mut String)) {
        edit(&mut self.filter);
        self.new_filter = true;
    }
    /// Ends the prompt when something is selected, otherwise queues a warning.
    fn confirm(&mut self) {
        if self.templates.any_selected() {
            self.confirmed = true;
            send(&self.cb_sink, Cursive::quit);
        } else {
            send(&self.cb_sink, nothing_selected_warning);
        }
    }
    /// Takes the pending filter change along with the current lists.
    fn lists(&mut self) -> Lists {
        // An invalid filter cannot happen for escaped text; show everything if it does.
        let filter = Filter::new(&self.filter).unwrap_or_default();
        Lists {
            filter: self.filter.clone(),
            available: self.templates.available_template_names(&filter),
            selected: self.templates.selected_template_names(),
            new_filter: std::mem::replace(&mut self.new_filter, false),
        }
    }
}

fn theme() -> Theme {
    Theme {
        shadow: false,
        borders: BorderStyle::Simple,
        palette: Palette::retro().with(|palette| {
            palette[PaletteColor::Background] = Color::TerminalDefault;
            palette[PaletteColor::View] = BaseColor::Black.dark();
            palette[PaletteColor::Primary] = BaseColor::White.light();
            palette[PaletteColor::Secondary] = BaseColor::Blue.light();
            palette[PaletteColor::Tertiary] = BaseColor::Yellow.light();
            palette[PaletteColor::Highlight] = BaseColor::Blue.dark();
            palette[PaletteColor::HighlightText] = BaseColor::White.light();
            palette[PaletteStyle::TitlePrimary] =
                Style::from(BaseColor::Yellow.light()).combine(Effect::Bold);
            palette[PaletteStyle::HighlightInactive] = Style::from(ColorStyle::new(
                BaseColor::White.light(),
                BaseColor::Black.light(),
            ));
        }),
    }
}
/// Printable characters edit the filter unless the focused list wants them.
fn event_view(content: impl View) -> impl View {
    fn clear_filter(siv: &mut Cursive) {
        set_filter(siv, |filter| filter.clear());
    }
    fn backspace(siv: &mut Cursive) {
        set_filter(siv, |filter| {
            filter.pop();
        });
    }
    OnEventView::new(content)
        .on_event(Event::Key(Key::Esc), clear_filter)
        .on_event(Event::Key(Key::Backspace), backspace)
        .on_event_inner(EventTrigger::from_fn(is_printable), |_, event| {
            let c = match event {
                Event::Char(c) => *c,
                _ => return None,
            };
            Some(EventResult::with_cb(move |siv| {
                set_filter(siv, |filter| filter.push(c))
            }))
        })
}
fn is_printable(event: &Event) -> bool {
    matches!(event, Event::Char(c) if !c.is_control())
}
fn set_filter(siv: &mut Cursive, edit: impl FnOnce(&mut String)) {
    siv.with_user_data(|user_data: &mut UserData| user_data.edit_filter(edit));
    refresh(siv);
}
fn main_layer(title: &str) -> impl View {
    fn make_label(text: &str) -> impl View {
        TextView::new(StyledString::styled(text, BaseColor::Yellow.dark())).h_align(HAlign::Center)
    }
    fn make_layout(label: &str, name: &str, on_submit: fn(&mut Cursive, &str)) -> impl View {
        fn make_select_view(name: &str, on_submit: fn(&mut Cursive, &str)) -> impl View {
            SelectView::<String>::new()
                .on_submit(on_submit)
                .with_name(name)
                .scrollable()
                .wrap_with(OnEventView::new)
                .on_pre_event_inner(Event::CtrlChar('n'), |view, _event| {
                    view.on_event(Event::Key(Key::Down));
                    Some(EventResult::Consumed(None))
                })
                .on_pre_event_inner(Event::CtrlChar('p'), |view, _event| {
                    view.on_event(Event::Key(Key::Up));
                    Some(EventResult::Consumed(None))
                })
        }
        LinearLayout::vertical()
            .child(make_label(label))
            .child(make_select_view(name, on_submit))
            .min_width(29)
            .full_width()
            .full_height()
    }

    let lists_layout = LinearLayout::horizontal()
        .child(make_layout(
            " Available templates ",
            AVAILABLE_VIEW_NAME,
            select_item,
        ))
        .child(DummyView::new().fixed_width(4))
        .child(make_layout(
            " Selected templates ",
            SELECTED_VIEW_NAME,
            unselect_item,
        ));

    let filter_layout = LinearLayout::horizontal()
        .child(make_label("Filter:"))
        .child(TextView::new(String::default()).with_name(FILTER_VIEW_NAME));

    LinearLayout::vertical()
        .child(make_label(title))
        .child(DummyView::new())
        .child(lists_layout)
        .child(DummyView::new())
        .child(filter_layout)
        .child(make_label(KEY_HINTS))
}
fn confirm(siv: &mut Cursive) {
    siv.with_user_data(UserData::confirm);
}
fn send(cb_sink: &CbSink, callback: fn(&mut Cursive)) {
    if cb_sink.send(Box::new(callback)).is_err() {
        debug!("event loop already closed");
    }
}
fn nothing_selected_warning(siv: &mut Cursive) {
    siv.add_layer(
        Dialog::info("Select one or more templates and try again.").h_align(HAlign::Center),
    );
}
fn select_item(siv: &mut Cursive, selection: &str) {
    siv.with_user_data(|user_data: &mut UserData| {
        user_data.templates.select_template(selection);
    });
    refresh(siv);
}
fn unselect_item(siv: &mut Cursive, selection: &str) {
    siv.with_user_data(|user_data: &mut UserData| {
        user_data.templates.unselect_template(selection);
    });
    refresh(siv);
}
fn refresh(siv: &mut Cursive) {
    let Some(lists) = siv.with_user_data(UserData::lists) else {
        return;
    };

    siv.call_on_name(FILTER_VIEW_NAME, |view: &mut TextView| {
        view.set_content(format!(" {}", lists.filter));
    });
    siv.call_on_name(AVAILABLE_VIEW_NAME, |view: &mut SelectView<String>| {
        let index = next_cursor(view.selected_id(), lists.new_filter, lists.available.len());
        view.clear();
        view.add_all_str(lists.available);
        view.set_selection(index);
    });
    siv.call_on_name(SELECTED_VIEW_NAME, |view: &mut SelectView<String>| {
        view.clear();
        view.add_all_str(lists.selected);
    });
}
/// The cursor goes back to the top after the filter changes and otherwise stays on the list.
fn next_cursor(previous: Option<usize>, new_filter: bool, len: usize) -> usize {
    match previous {
        Some(index) if !new_filter => index.min(len.saturating_sub(1)),
        _ => 0,
    }
}
fn help(siv: &mut Cursive) {
    let message = "Pick the templates to include in the .gitignore file, using templates from https://www.toptal.com/developers/gitignore/

- Use the up and down arrows to highlight a template.
- Press Enter to move the highlighted template between the lists.
- Type part of a template's name to filter the list. Esc clears the filter.

Press Ctrl+S when done. If the .gitignore file already exists, you will be given the option of replacing it or appending to it.

Press Ctrl+Q to quit without writing anything.";
    siv.add_layer(Dialog::info(message).h_align(HAlign::Center));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_data() -> (UserData, crossbeam_channel::Receiver<Callback>) {
        let (cb_sink, callbacks) = crossbeam_channel::unbounded();
        let options = ["go", "python", "rust"].map(String::from);
        (UserData::new(&options, cb_sink), callbacks)
    }

    #[test]
    fn confirming_nothing_warns_and_keeps_the_prompt_open() {
        let (mut user_data, callbacks) = user_data();
        user_data.confirm();
        assert!(!user_data.confirmed);
        assert_eq!(callbacks.try_iter().count(), 1);
    }

    #[test]
    fn confirming_a_selection_quits() {
        let (mut user_data, callbacks) = user_data();
        user_data.templates.select_template("rust");
        user_data.confirm();
        assert!(user_data.confirmed);
        assert_eq!(callbacks.try_iter().count(), 1);
    }

    #[test]
    fn typing_narrows_the_available_list() {
        let (mut user_data, _callbacks) = user_data();
        user_data.edit_filter(|filter| filter.push_str("py"));
        let lists = user_data.lists();
        assert_eq!(lists.filter, "py");
        assert_eq!(lists.available, vec!["python"]);
        assert!(lists.new_filter);
        assert!(!user_data.lists().new_filter);
    }

    #[test]
    fn backspace_drops_one_character() {
        let (mut user_data, _callbacks) = user_data();
        user_data.edit_filter(|filter| filter.push_str("rus"));
        user_data.edit_filter(|filter| {
            filter.pop();
        });
        assert_eq!(user_data.filter, "ru");
    }

    #[test]
    fn escape_clears_the_filter() {
        let (mut user_data, _callbacks) = user_data();
        user_data.edit_filter(|filter| filter.push_str("zz"));
        assert!(user_data.lists().available.is_empty());
        user_data.edit_filter(String::clear);
        let lists = user_data.lists();
        assert_eq!(lists.filter, "");
        assert_eq!(lists.available, vec!["go", "python", "rust"]);
    }

    #[test]
    fn selected_templates_leave_the_available_list() {
        let (mut user_data, _callbacks) = user_data();
        user_data.templates.select_template("go");
        let lists = user_data.lists();
        assert_eq!(lists.available, vec!["python", "rust"]);
        assert_eq!(lists.selected, vec!["go"]);
    }

    #[test]
    fn only_printable_characters_edit_the_filter() {
        assert!(is_printable(&Event::Char('a')));
        assert!(!is_printable(&Event::Char('\u{7}')));
        assert!(!is_printable(&Event::CtrlChar('s')));
        assert!(!is_printable(&Event::Key(Key::Enter)));
    }

    #[test]
    fn cursor_stays_within_the_list() {
        assert_eq!(next_cursor(Some(2), false, 5), 2);
        assert_eq!(next_cursor(Some(4), false, 2), 1);
        assert_eq!(next_cursor(Some(3), false, 0), 0);
        assert_eq!(next_cursor(None, false, 5), 0);
    }

    #[test]
    fn cursor_returns_to_the_top_after_filtering() {
        assert_eq!(next_cursor(Some(3), true, 5), 0);
    }
}
