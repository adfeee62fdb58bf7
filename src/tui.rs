use std::io::stdout;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};

use crate::ai::AiClient;
use crate::models::{ExtractionResult, Status};
use crate::store::{KEY_API_KEY, KEY_TARGET_ROLE, KEY_USER_NAME, Settings};
use crate::tracker::{Mode, Tracker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Panel {
    Resume,
    Growth,
    Tracker,
    Settings,
}

impl Panel {
    const ALL: [Panel; 4] = [Panel::Resume, Panel::Growth, Panel::Tracker, Panel::Settings];

    fn title(self) -> &'static str {
        match self {
            Panel::Resume => "Resume Architect",
            Panel::Growth => "Growth Engine",
            Panel::Tracker => "Job Tracker",
            Panel::Settings => "Settings",
        }
    }

    fn index(self) -> usize {
        Panel::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }
}

/// Completion of a background AI call, delivered over the channel.
enum Outcome {
    Extraction(Result<ExtractionResult>),
    Analysis(Result<String>),
    Latex(Result<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Role,
    Company,
    Location,
    Salary,
    Status,
    FreeText,
}

impl FormField {
    const ALL: [FormField; 6] = [
        FormField::Role,
        FormField::Company,
        FormField::Location,
        FormField::Salary,
        FormField::Status,
        FormField::FreeText,
    ];

    fn next(self) -> FormField {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    fn prev(self) -> FormField {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Default)]
struct GrowthState {
    input: String,
    analysis: Option<String>,
    busy: bool,
    scroll: u16,
}

#[derive(Default)]
struct ResumeState {
    input: String,
    latex: String,
    busy: bool,
    scroll: u16,
}

struct SettingsForm {
    api_key: String,
    user_name: String,
    target_role: String,
    field: usize,
}

impl SettingsForm {
    fn read(settings: &Settings) -> Self {
        Self {
            api_key: settings.api_key().to_string(),
            user_name: settings.user_name().to_string(),
            target_role: settings.target_role().to_string(),
            field: 0,
        }
    }

    fn active_mut(&mut self) -> &mut String {
        match self.field {
            0 => &mut self.api_key,
            1 => &mut self.user_name,
            _ => &mut self.target_role,
        }
    }
}

struct App {
    panel: Panel,
    tracker: Tracker,
    selected: usize,
    form_field: FormField,
    growth: GrowthState,
    resume: ResumeState,
    settings_form: SettingsForm,
    settings: Settings,
    notice: Option<String>,
    tx: mpsc::Sender<Outcome>,
    rx: mpsc::Receiver<Outcome>,
}

impl App {
    fn new(tracker: Tracker, settings: Settings) -> Self {
        let (tx, rx) = mpsc::channel();
        let settings_form = SettingsForm::read(&settings);
        Self {
            panel: Panel::Tracker,
            tracker,
            selected: 0,
            form_field: FormField::Role,
            growth: GrowthState::default(),
            resume: ResumeState::default(),
            settings_form,
            settings,
            notice: None,
            tx,
            rx,
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.tracker.jobs().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    fn spawn_extract(&self, text: String) {
        let tx = self.tx.clone();
        let api_key = self.settings.api_key().to_string();
        let base_url = self.settings.backend_url().to_string();
        thread::spawn(move || {
            let outcome =
                AiClient::over_http(&base_url).and_then(|c| c.extract(&text, &api_key));
            let _ = tx.send(Outcome::Extraction(outcome));
        });
    }

    fn spawn_analyze(&self, job_description: String) {
        let tx = self.tx.clone();
        let api_key = self.settings.api_key().to_string();
        let base_url = self.settings.backend_url().to_string();
        thread::spawn(move || {
            let outcome = AiClient::over_http(&base_url)
                .and_then(|c| c.analyze_gap(&job_description, &api_key));
            let _ = tx.send(Outcome::Analysis(outcome));
        });
    }

    fn spawn_optimize(&self, description: String, current_latex: String) {
        let tx = self.tx.clone();
        let api_key = self.settings.api_key().to_string();
        let base_url = self.settings.backend_url().to_string();
        thread::spawn(move || {
            let outcome = AiClient::over_http(&base_url)
                .and_then(|c| c.optimize_resume(&description, &current_latex, &api_key));
            let _ = tx.send(Outcome::Latex(outcome));
        });
    }

    fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Extraction(Ok(result)) => {
                self.tracker.extraction_succeeded(result);
                self.notice = self.tracker.take_notice();
            }
            Outcome::Extraction(Err(e)) => {
                self.tracker.extraction_failed(&e);
                self.notice = self.tracker.take_notice();
            }
            Outcome::Analysis(Ok(text)) => {
                self.growth.busy = false;
                self.growth.analysis = Some(text);
                self.growth.scroll = 0;
                self.notice = Some("Gap analysis ready".to_string());
            }
            Outcome::Analysis(Err(e)) => {
                self.growth.busy = false;
                self.notice = Some(format!("Analysis failed: {:#}", e));
            }
            Outcome::Latex(Ok(text)) => {
                self.resume.busy = false;
                self.resume.latex = text;
                self.resume.scroll = 0;
                self.notice = Some("LaTeX generated".to_string());
            }
            Outcome::Latex(Err(e)) => {
                self.resume.busy = false;
                self.notice = Some(format!("Generation failed: {:#}", e));
            }
        }
    }

    fn save_settings(&mut self) {
        let result = self
            .settings
            .set(KEY_API_KEY, &self.settings_form.api_key)
            .and_then(|_| self.settings.set(KEY_USER_NAME, &self.settings_form.user_name))
            .and_then(|_| {
                self.settings
                    .set(KEY_TARGET_ROLE, &self.settings_form.target_role)
            });
        self.notice = Some(match result {
            Ok(()) => "Settings saved".to_string(),
            Err(e) => format!("Save failed: {:#}", e),
        });
    }
}

pub fn run(tracker: Tracker, settings: Settings) -> Result<()> {
    let mut app = App::new(tracker, settings);
    app.notice = app.tracker.take_notice();

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut list_state = ListState::default();

    loop {
        while let Ok(outcome) = app.rx.try_recv() {
            app.apply(outcome);
        }
        app.clamp_selection();
        list_state.select(if app.tracker.jobs().is_empty() {
            None
        } else {
            Some(app.selected)
        });

        terminal.draw(|frame| draw(frame, app, &mut list_state))?;

        // Poll so channel completions keep flowing while idle
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        // Raw mode swallows SIGINT; honor Ctrl+C everywhere
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            break;
        }

        match key.code {
            KeyCode::F(1) => {
                app.panel = Panel::Resume;
                continue;
            }
            KeyCode::F(2) => {
                app.panel = Panel::Growth;
                continue;
            }
            KeyCode::F(3) => {
                app.panel = Panel::Tracker;
                continue;
            }
            KeyCode::F(4) => {
                app.panel = Panel::Settings;
                continue;
            }
            _ => {}
        }

        let quit = match app.panel {
            Panel::Tracker => on_tracker_key(app, key)?,
            Panel::Growth => on_growth_key(app, key),
            Panel::Resume => on_resume_key(app, key),
            Panel::Settings => on_settings_key(app, key),
        };
        if quit {
            break;
        }
    }
    Ok(())
}

fn on_tracker_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    match app.tracker.mode() {
        Mode::Idle => on_browse_key(app, key),
        Mode::Composing | Mode::Extracting => {
            on_form_key(app, key)?;
            Ok(false)
        }
    }
}

fn on_browse_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
        KeyCode::Down | KeyCode::Char('j') => {
            if !app.tracker.jobs().is_empty() && app.selected < app.tracker.jobs().len() - 1 {
                app.selected += 1;
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.selected = app.selected.saturating_sub(1);
        }
        KeyCode::Char('a') => {
            app.tracker.open_form();
            app.form_field = FormField::Role;
        }
        KeyCode::Char('d') => {
            if let Some(job) = app.tracker.jobs().get(app.selected) {
                let id = job.id;
                let role = job.role.clone();
                match app.tracker.delete(id) {
                    Ok(true) => app.notice = Some(format!("Deleted '{}'", role)),
                    Ok(false) => {}
                    Err(e) => app.notice = Some(format!("Delete failed: {:#}", e)),
                }
            }
        }
        KeyCode::Char('p') => set_selected_status(app, Status::Applied),
        KeyCode::Char('i') => set_selected_status(app, Status::Interview),
        KeyCode::Char('o') => set_selected_status(app, Status::Offer),
        KeyCode::Char('x') => set_selected_status(app, Status::Rejected),
        _ => {}
    }
    Ok(false)
}

fn set_selected_status(app: &mut App, status: Status) {
    if let Some(job) = app.tracker.jobs().get(app.selected) {
        let id = job.id;
        if let Err(e) = app.tracker.set_status(id, status) {
            app.notice = Some(format!("Update failed: {:#}", e));
        }
    }
}

fn on_form_key(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('e') => {
                if app.tracker.mode() == Mode::Extracting {
                    app.notice = Some("Extraction already running".to_string());
                } else if let Some(text) = app.tracker.begin_extraction() {
                    app.spawn_extract(text);
                } else {
                    app.notice = Some("Paste a job description first".to_string());
                }
            }
            KeyCode::Char('s') => submit_form(app)?,
            _ => {}
        }
        return Ok(());
    }

    match key.code {
        KeyCode::Esc => app.tracker.cancel(),
        KeyCode::Tab | KeyCode::Down => app.form_field = app.form_field.next(),
        KeyCode::BackTab | KeyCode::Up => app.form_field = app.form_field.prev(),
        KeyCode::Enter => {
            // Enter types a newline only in the description box
            if app.form_field == FormField::FreeText {
                app.tracker.draft.free_text.push('\n');
            } else {
                submit_form(app)?;
            }
        }
        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
            if app.form_field == FormField::Status =>
        {
            app.tracker.draft.status = app.tracker.draft.status.next();
        }
        KeyCode::Char(c) => {
            if let Some(field) = draft_field_mut(app) {
                field.push(c);
            }
        }
        KeyCode::Backspace => {
            if let Some(field) = draft_field_mut(app) {
                field.pop();
            }
        }
        _ => {}
    }
    Ok(())
}

fn draft_field_mut(app: &mut App) -> Option<&mut String> {
    let draft = &mut app.tracker.draft;
    match app.form_field {
        FormField::Role => Some(&mut draft.role),
        FormField::Company => Some(&mut draft.company),
        FormField::Location => Some(&mut draft.location),
        FormField::Salary => Some(&mut draft.salary),
        FormField::Status => None,
        FormField::FreeText => Some(&mut draft.free_text),
    }
}

fn submit_form(app: &mut App) -> Result<()> {
    match app.tracker.submit() {
        Ok(Some(_)) => {
            app.selected = 0;
            app.notice = Some("Application saved".to_string());
        }
        Ok(None) => {
            if let Some(notice) = app.tracker.take_notice() {
                app.notice = Some(notice);
            }
        }
        Err(e) => app.notice = Some(format!("Save failed: {:#}", e)),
    }
    Ok(())
}

fn on_growth_key(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('e') => {
                if app.growth.busy {
                    app.notice = Some("Analysis already running".to_string());
                } else if app.growth.input.trim().is_empty() {
                    app.notice = Some("Paste a job description first".to_string());
                } else {
                    app.growth.busy = true;
                    app.spawn_analyze(app.growth.input.clone());
                }
            }
            KeyCode::Char('r') => {
                app.growth.input.clear();
                app.growth.analysis = None;
                app.growth.scroll = 0;
            }
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Esc => app.panel = Panel::Tracker,
        KeyCode::Char(c) => app.growth.input.push(c),
        KeyCode::Backspace => {
            app.growth.input.pop();
        }
        KeyCode::Enter => app.growth.input.push('\n'),
        KeyCode::PageDown => app.growth.scroll = app.growth.scroll.saturating_add(3),
        KeyCode::PageUp => app.growth.scroll = app.growth.scroll.saturating_sub(3),
        _ => {}
    }
    false
}

fn on_resume_key(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('e') => {
                if app.resume.busy {
                    app.notice = Some("Generation already running".to_string());
                } else if app.resume.input.trim().is_empty() {
                    app.notice = Some("Type an instruction or paste a job description".to_string());
                } else {
                    app.resume.busy = true;
                    app.spawn_optimize(app.resume.input.clone(), app.resume.latex.clone());
                }
            }
            KeyCode::Char('s') => {
                if app.resume.latex.is_empty() {
                    app.notice = Some("Nothing to save yet".to_string());
                } else {
                    app.notice = Some(match std::fs::write("Resume.tex", &app.resume.latex) {
                        Ok(()) => "Wrote Resume.tex".to_string(),
                        Err(e) => format!("Write failed: {}", e),
                    });
                }
            }
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Esc => app.panel = Panel::Tracker,
        KeyCode::Char(c) => app.resume.input.push(c),
        KeyCode::Backspace => {
            app.resume.input.pop();
        }
        KeyCode::Enter => app.resume.input.push('\n'),
        KeyCode::PageDown => app.resume.scroll = app.resume.scroll.saturating_add(3),
        KeyCode::PageUp => app.resume.scroll = app.resume.scroll.saturating_sub(3),
        _ => {}
    }
    false
}

fn on_settings_key(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('s') {
            app.save_settings();
        }
        return false;
    }

    match key.code {
        KeyCode::Esc => app.panel = Panel::Tracker,
        KeyCode::Tab | KeyCode::Down => {
            app.settings_form.field = (app.settings_form.field + 1) % 3;
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.settings_form.field = (app.settings_form.field + 2) % 3;
        }
        KeyCode::Char(c) => app.settings_form.active_mut().push(c),
        KeyCode::Backspace => {
            app.settings_form.active_mut().pop();
        }
        _ => {}
    }
    false
}

// --- Rendering ---

fn draw(frame: &mut Frame, app: &App, list_state: &mut ListState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let titles: Vec<Line> = Panel::ALL
        .iter()
        .enumerate()
        .map(|(i, p)| Line::from(format!("F{} {}", i + 1, p.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" CareerOS "))
        .select(app.panel.index())
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, chunks[0]);

    match app.panel {
        Panel::Tracker => draw_tracker(frame, app, chunks[1], list_state),
        Panel::Growth => draw_growth(frame, app, chunks[1]),
        Panel::Resume => draw_resume(frame, app, chunks[1]),
        Panel::Settings => draw_settings(frame, app, chunks[1]),
    }

    if let Some(notice) = &app.notice {
        let line = Paragraph::new(notice.as_str()).style(Style::default().fg(Color::Yellow));
        frame.render_widget(line, chunks[2]);
    }

    let help = Paragraph::new(help_line(app)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[3]);
}

fn help_line(app: &App) -> &'static str {
    match app.panel {
        Panel::Tracker => match app.tracker.mode() {
            Mode::Idle => {
                " j/k:navigate  a:add  d:delete  p/i/o/x:status  F1-F4:panels  q:quit"
            }
            Mode::Composing => {
                " Tab:next field  Ctrl+E:extract from description  Enter/Ctrl+S:save  Esc:cancel"
            }
            Mode::Extracting => " extracting...  fields stay editable; save once it finishes",
        },
        Panel::Growth => " type/paste description  Ctrl+E:analyze  Ctrl+R:reset  PgUp/PgDn:scroll  Esc:back",
        Panel::Resume => " type instruction  Ctrl+E:generate  Ctrl+S:write Resume.tex  PgUp/PgDn:scroll  Esc:back",
        Panel::Settings => " Tab:next field  Ctrl+S:save  Esc:back",
    }
}

fn status_style(status: Status) -> Style {
    match status {
        Status::Applied => Style::default().fg(Color::Cyan),
        Status::Interview => Style::default().fg(Color::Yellow),
        Status::Offer => Style::default().fg(Color::Green),
        Status::Rejected => Style::default().fg(Color::Red),
    }
}

fn draw_tracker(frame: &mut Frame, app: &App, area: Rect, list_state: &mut ListState) {
    match app.tracker.mode() {
        Mode::Idle => draw_job_list(frame, app, area, list_state),
        Mode::Composing | Mode::Extracting => draw_form(frame, app, area),
    }
}

fn draw_job_list(frame: &mut Frame, app: &App, area: Rect, list_state: &mut ListState) {
    let jobs = app.tracker.jobs();
    if jobs.is_empty() {
        let empty = Paragraph::new("No applications yet. Press 'a' to add one.")
            .block(Block::default().borders(Borders::ALL).title(" Applications "))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = jobs
        .iter()
        .map(|job| {
            let line = Line::from(vec![
                Span::styled(format!("{:<10}", job.status.to_string()), status_style(job.status)),
                Span::raw(format!(
                    " {:<26} {:<20} {:<14} {}",
                    truncate(&job.role, 24),
                    truncate(&job.company, 18),
                    truncate(&job.location, 12),
                    job.date_applied
                )),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " Applications ({}) ",
            jobs.len()
        )))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, list_state);
}

fn draw_form(frame: &mut Frame, app: &App, area: Rect) {
    let extracting = app.tracker.mode() == Mode::Extracting;
    let title = if extracting {
        " Add Application (extracting...) "
    } else {
        " Add Application "
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(3)])
        .split(area);

    let draft = &app.tracker.draft;
    let rows = [
        (FormField::Role, "Role", draft.role.as_str()),
        (FormField::Company, "Company", draft.company.as_str()),
        (FormField::Location, "Location", draft.location.as_str()),
        (FormField::Salary, "Salary", draft.salary.as_str()),
    ];

    let mut lines: Vec<Line> = rows
        .iter()
        .map(|(field, label, value)| field_line(*field == app.form_field, label, value))
        .collect();
    lines.push(field_line(
        app.form_field == FormField::Status,
        "Status",
        &format!("< {} >", draft.status),
    ));

    let fields = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(fields, chunks[0]);

    let text_title = if app.form_field == FormField::FreeText {
        " Job Description (Ctrl+E to extract fields)* "
    } else {
        " Job Description (Ctrl+E to extract fields) "
    };
    let free_text = Paragraph::new(draft.free_text.as_str())
        .block(Block::default().borders(Borders::ALL).title(text_title))
        .wrap(Wrap { trim: false });
    frame.render_widget(free_text, chunks[1]);
}

fn field_line<'a>(active: bool, label: &'a str, value: &str) -> Line<'a> {
    let marker = if active { "> " } else { "  " };
    let style = if active {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(Span::styled(
        format!("{}{:<10} {}", marker, label, value),
        style,
    ))
}

fn draw_growth(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let input_title = if app.growth.busy {
        " Job Description (analyzing...) "
    } else {
        " Job Description "
    };
    let input = Paragraph::new(app.growth.input.as_str())
        .block(Block::default().borders(Borders::ALL).title(input_title))
        .wrap(Wrap { trim: false });
    frame.render_widget(input, chunks[0]);

    let body = match &app.growth.analysis {
        Some(analysis) => textwrap::fill(analysis, chunks[1].width.saturating_sub(4) as usize),
        None => "Results will appear here".to_string(),
    };
    let output = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL).title(" Gap Analysis "))
        .wrap(Wrap { trim: false })
        .scroll((app.growth.scroll, 0));
    frame.render_widget(output, chunks[1]);
}

fn draw_resume(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let input_title = if app.resume.busy {
        " Instructions / Job Description (generating...) "
    } else {
        " Instructions / Job Description "
    };
    let input = Paragraph::new(app.resume.input.as_str())
        .block(Block::default().borders(Borders::ALL).title(input_title))
        .wrap(Wrap { trim: false });
    frame.render_widget(input, chunks[0]);

    let body = if app.resume.latex.is_empty() {
        "% LaTeX source will appear here"
    } else {
        app.resume.latex.as_str()
    };
    let output = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL).title(" source.tex "))
        .wrap(Wrap { trim: false })
        .scroll((app.resume.scroll, 0));
    frame.render_widget(output, chunks[1]);
}

fn draw_settings(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.settings_form;
    let masked = "*".repeat(form.api_key.chars().count());
    let lines = vec![
        field_line(form.field == 0, "API Key", &masked),
        field_line(form.field == 1, "Name", &form.user_name),
        field_line(form.field == 2, "Target", &form.target_role),
        Line::from(""),
        Line::from(Span::styled(
            format!("  Data: {}", app.settings.path().display()),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Settings "));
    frame.render_widget(widget, area);
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
