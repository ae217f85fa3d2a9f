//! Delegated UI Controller
//!
//! Owns the page, the transport and the generation counter. `dispatch` does
//! the synchronous part of an action right away (loading placeholders) and
//! returns the rest as a future for the caller to spawn.

use std::future::Future;
use std::rc::Rc;

use crate::action::Action;
use crate::commands::{self, Transport};
use crate::config::UiConfig;
use crate::error::UiError;
use crate::generation::{Generations, Ticket};
use crate::markup::{self, AlertKind};
use crate::models::{ContactFormReply, SubmitOutcome, NON_FIELD_ERRORS};
use crate::page::{Dialog, Page, Region};

pub struct Controller<P: Page, T: Transport> {
    config: UiConfig,
    page: P,
    transport: T,
    generations: Generations,
}

impl<P, T> Controller<P, T>
where
    P: Page + 'static,
    P::Node: 'static,
    T: Transport + 'static,
{
    pub fn new(config: UiConfig, page: P, transport: T) -> Self {
        Self {
            config,
            page,
            transport,
            generations: Generations::new(),
        }
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Take a resolved target. Unusable ones are logged and start nothing.
    pub fn accept(
        self: &Rc<Self>,
        resolved: Result<Action<P::Node>, UiError>,
    ) -> Option<impl Future<Output = ()> + 'static> {
        match resolved {
            Ok(action) => Some(self.dispatch(action)),
            Err(e) => {
                log::warn!("[UI] ignoring target: {}", e);
                None
            }
        }
    }

    /// Start an action. Placeholders are visible when this returns.
    pub fn dispatch(self: &Rc<Self>, action: Action<P::Node>) -> impl Future<Output = ()> + 'static {
        let ticket = self.generations.begin(&action.element_key());
        log::debug!("[UI] {} started ({})", action.name(), ticket.key());

        let texts = &self.config.texts;
        match &action {
            Action::OpenDetail { .. } => {
                self.page
                    .set_content(Region::PropertyDetail, &markup::loading(&texts.loading_property));
            }
            Action::OpenContactForm { .. } => {
                self.page
                    .set_content(Region::ContactContent, &markup::loading(&texts.loading_contact));
            }
            Action::ToggleFavorite { .. } | Action::SubmitContactForm { .. } => {}
        }

        let this = Rc::clone(self);
        async move { this.run(action, ticket).await }
    }

    async fn run(&self, action: Action<P::Node>, ticket: Ticket) {
        match action {
            Action::ToggleFavorite { button, property_id, url } => {
                self.toggle_favorite(&button, &property_id, &url, &ticket).await
            }
            Action::OpenDetail { url } => self.open_detail(&url, &ticket).await,
            Action::OpenContactForm { url } => self.open_contact_form(&url, &ticket).await,
            Action::SubmitContactForm { form, action } => {
                self.submit_contact_form(&form, &action, &ticket).await
            }
        }
    }

    fn superseded(&self, ticket: &Ticket) -> bool {
        let stale = !self.generations.is_current(ticket);
        if stale {
            log::debug!("[UI] dropping stale response for {}", ticket.key());
        }
        stale
    }

    async fn toggle_favorite(&self, button: &P::Node, property_id: &str, url: &str, ticket: &Ticket) {
        let token = self.page.csrf_token();
        match commands::toggle_favorite(&self.transport, url, token.as_deref()).await {
            Ok(status) => {
                if self.superseded(ticket) {
                    return;
                }
                log::info!("[UI] property {} favorite: {:?}", property_id, status);
                self.page.set_favorite_icon(button, status);
            }
            Err(e) => log::error!("[UI] toggle favorite for {} failed: {}", property_id, e),
        }
    }

    async fn open_detail(&self, url: &str, ticket: &Ticket) {
        let result =
            commands::fetch_property_detail(&self.transport, url, &self.config.endpoints.modal_param).await;
        if self.superseded(ticket) {
            return;
        }

        match result {
            Ok(html) => {
                self.page.set_content(Region::PropertyDetail, &html);
                self.page.show_dialog(Dialog::Property);
            }
            Err(e) => {
                log::error!("[UI] loading property {} failed: {}", url, e);
                self.page.set_content(
                    Region::PropertyDetail,
                    &markup::alert(AlertKind::Danger, &self.config.texts.property_error),
                );
            }
        }
    }

    async fn open_contact_form(&self, url: &str, ticket: &Ticket) {
        let result = commands::load_contact_form(&self.transport, url).await;
        if self.superseded(ticket) {
            return;
        }

        let texts = &self.config.texts;
        match result {
            Ok(ContactFormReply::Form(html)) => {
                self.page.set_content(Region::ContactContent, &html);
                self.page.show_dialog(Dialog::Contact);
            }
            Ok(ContactFormReply::Redirect(target)) => {
                log::info!("[UI] contact form redirects to {}", target);
                self.page.navigate(&target);
            }
            Ok(ContactFormReply::Denied(message)) => {
                let message = message.as_deref().unwrap_or(&texts.contact_denied);
                self.page
                    .set_content(Region::ContactContent, &markup::alert(AlertKind::Warning, message));
            }
            Err(e) => {
                log::error!("[UI] loading contact form failed: {}", e);
                self.page.set_content(
                    Region::ContactContent,
                    &markup::alert(AlertKind::Danger, &texts.contact_error),
                );
            }
        }
    }

    async fn submit_contact_form(&self, form: &P::Node, action: &str, ticket: &Ticket) {
        let texts = &self.config.texts;

        let fields = match self.page.form_fields(form) {
            Ok(fields) => fields,
            Err(e) => {
                log::error!("[UI] reading contact form failed: {}", e);
                self.page.show_form_message(&texts.submit_error, &[]);
                return;
            }
        };

        let token = self.page.csrf_token();
        let result = commands::submit_contact_form(&self.transport, action, &fields, token.as_deref()).await;
        if self.superseded(ticket) {
            return;
        }

        match result {
            Ok(outcome) if outcome.success => self.contact_sent(outcome).await,
            Ok(outcome) => {
                log::warn!("[UI] contact form rejected: {:?}", outcome.message);
                self.show_submit_errors(form, &outcome);
            }
            Err(e) => {
                log::error!("[UI] submitting contact form failed: {}", e);
                self.page.show_form_message(&texts.submit_error, &[]);
            }
        }
    }

    async fn contact_sent(&self, outcome: SubmitOutcome) {
        let texts = &self.config.texts;
        self.page.hide_dialog(Dialog::Contact);

        let message = outcome.message.as_deref().unwrap_or(&texts.sent_message);
        let warning = (outcome.email_sent == Some(false)).then_some(texts.email_not_sent.as_str());

        if let Some(banner) = self.page.show_banner(&texts.sent_title, message, warning) {
            self.page.sleep(self.config.banner_dismiss_ms).await;
            self.page.dismiss_banner(banner);
        }
    }

    fn show_submit_errors(&self, form: &P::Node, outcome: &SubmitOutcome) {
        self.page.clear_form_errors(form);

        let mut unplaced = Vec::new();
        for (field, messages) in &outcome.errors {
            if field == NON_FIELD_ERRORS || !self.page.show_field_errors(form, field, messages) {
                unplaced.extend(messages.iter().cloned());
            }
        }

        let message = outcome
            .message
            .as_deref()
            .unwrap_or(&self.config.texts.submit_failed);
        self.page.show_form_message(message, &unplaced);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::tests::{FakeNode, FakeTarget};
    use crate::action::{resolve_click, resolve_submit};
    use crate::commands::transport::tests::{html, json, FakeTransport};
    use crate::commands::transport::{HttpResponse, Method};
    use crate::models::FavoriteStatus;
    use futures::executor::block_on;
    use std::cell::RefCell;

    /// Records every page operation in order
    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Content(Region, String),
        Show(Dialog),
        Hide(Dialog),
        Icon(&'static str, FavoriteStatus),
        ClearErrors,
        FieldErrors(String, Vec<String>),
        FormMessage(String, Vec<String>),
        Banner(String, Option<String>),
        Sleep(u32),
        Dismiss(u32),
        Navigate(String),
    }

    #[derive(Default)]
    struct FakePage {
        ops: RefCell<Vec<Op>>,
        fields: Vec<&'static str>,
        banners: RefCell<u32>,
    }

    impl FakePage {
        fn with_fields(fields: Vec<&'static str>) -> Self {
            Self { fields, ..Default::default() }
        }

        fn ops(&self) -> Vec<Op> {
            self.ops.borrow().clone()
        }

        fn record(&self, op: Op) {
            self.ops.borrow_mut().push(op);
        }
    }

    impl Page for FakePage {
        type Node = FakeNode;
        type Banner = u32;

        fn set_content(&self, region: Region, html: &str) -> bool {
            self.record(Op::Content(region, html.to_string()));
            true
        }

        fn show_dialog(&self, dialog: Dialog) {
            self.record(Op::Show(dialog));
        }

        fn hide_dialog(&self, dialog: Dialog) {
            self.record(Op::Hide(dialog));
        }

        fn set_favorite_icon(&self, button: &FakeNode, status: FavoriteStatus) {
            self.record(Op::Icon(button.name, status));
        }

        fn csrf_token(&self) -> Option<String> {
            Some("tok".to_string())
        }

        fn form_fields(&self, _form: &FakeNode) -> Result<Vec<(String, String)>, UiError> {
            Ok(vec![("mensaje".to_string(), "Hola".to_string())])
        }

        fn clear_form_errors(&self, _form: &FakeNode) {
            self.record(Op::ClearErrors);
        }

        fn show_field_errors(&self, _form: &FakeNode, field: &str, messages: &[String]) -> bool {
            if !self.fields.iter().any(|f| *f == field) {
                return false;
            }
            self.record(Op::FieldErrors(field.to_string(), messages.to_vec()));
            true
        }

        fn show_form_message(&self, message: &str, extra: &[String]) {
            self.record(Op::FormMessage(message.to_string(), extra.to_vec()));
        }

        fn show_banner(&self, title: &str, message: &str, warning: Option<&str>) -> Option<u32> {
            self.record(Op::Banner(format!("{} {}", title, message), warning.map(str::to_string)));
            let mut count = self.banners.borrow_mut();
            *count += 1;
            Some(*count)
        }

        fn dismiss_banner(&self, banner: u32) {
            self.record(Op::Dismiss(banner));
        }

        fn navigate(&self, url: &str) {
            self.record(Op::Navigate(url.to_string()));
        }

        async fn sleep(&self, ms: u32) {
            self.record(Op::Sleep(ms));
        }
    }

    type TestController = Controller<FakePage, FakeTransport>;

    fn controller(page: FakePage, replies: Vec<Result<HttpResponse, UiError>>) -> Rc<TestController> {
        Rc::new(Controller::new(UiConfig::default(), page, FakeTransport::replying(replies)))
    }

    fn favorite(name: &'static str, id: &str) -> Action<FakeNode> {
        Action::ToggleFavorite {
            button: FakeNode::new(name),
            property_id: id.to_string(),
            url: format!("/toggle_favorite/{}/", id),
        }
    }

    fn contact_form() -> Action<FakeNode> {
        Action::SubmitContactForm {
            form: FakeNode::new("form"),
            action: "/contact-owner/3/".to_string(),
        }
    }

    #[test]
    fn test_favorite_one_post_and_icon_update() {
        let c = controller(FakePage::default(), vec![json(200, r#"{"status": "added"}"#)]);

        block_on(c.dispatch(favorite("heart", "5")));

        let sent = c.transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::Post);
        assert_eq!(sent[0].url, "/toggle_favorite/5/");
        assert_eq!(sent[0].header_value("X-CSRFToken"), Some("tok"));
        assert_eq!(c.page.ops(), vec![Op::Icon("heart", FavoriteStatus::Added)]);
    }

    #[test]
    fn test_favorite_failure_leaves_icon() {
        let c = controller(FakePage::default(), vec![html(500, "boom")]);
        block_on(c.dispatch(favorite("heart", "5")));
        assert!(c.page.ops().is_empty());
    }

    #[test]
    fn test_superseded_favorite_response_is_dropped() {
        let c = controller(
            FakePage::default(),
            vec![json(200, r#"{"status": "added"}"#), json(200, r#"{"status": "removed"}"#)],
        );

        let first = c.dispatch(favorite("heart", "5"));
        let second = c.dispatch(favorite("heart", "5"));
        block_on(first);
        block_on(second);

        assert_eq!(c.transport.requests().len(), 2);
        assert_eq!(c.page.ops(), vec![Op::Icon("heart", FavoriteStatus::Removed)]);
    }

    #[test]
    fn test_favorite_without_id_sends_nothing() {
        let c = controller(FakePage::default(), vec![json(200, r#"{"status": "added"}"#)]);
        let selector = c.config().selectors.favorite_list();
        let target = FakeTarget::inside(&selector, FakeNode::new("heart"));

        let resolved = resolve_click(&target, c.config()).unwrap();
        assert!(c.accept(resolved).is_none());

        assert!(c.transport.requests().is_empty());
        assert!(c.page.ops().is_empty());
    }

    #[test]
    fn test_favorites_on_different_properties_do_not_interfere() {
        let c = controller(
            FakePage::default(),
            vec![json(200, r#"{"status": "added"}"#), json(200, r#"{"status": "added"}"#)],
        );

        let a = c.dispatch(favorite("a", "1"));
        let b = c.dispatch(favorite("b", "2"));
        block_on(a);
        block_on(b);

        assert_eq!(
            c.page.ops(),
            vec![Op::Icon("a", FavoriteStatus::Added), Op::Icon("b", FavoriteStatus::Added)]
        );
    }

    #[test]
    fn test_detail_placeholder_then_content() {
        let c = controller(FakePage::default(), vec![html(200, "<div>casa</div>")]);

        let pending = c.dispatch(Action::OpenDetail { url: "/propiedad/3/".to_string() });
        let loading = markup::loading(&UiConfig::default().texts.loading_property);
        assert_eq!(c.page.ops(), vec![Op::Content(Region::PropertyDetail, loading.clone())]);

        block_on(pending);
        assert_eq!(
            c.page.ops(),
            vec![
                Op::Content(Region::PropertyDetail, loading),
                Op::Content(Region::PropertyDetail, "<div>casa</div>".to_string()),
                Op::Show(Dialog::Property),
            ]
        );
        assert_eq!(c.transport.requests()[0].url, "/propiedad/3/?modal=1");
    }

    #[test]
    fn test_detail_error_replaces_placeholder() {
        let c = controller(FakePage::default(), vec![Err(UiError::Network("offline".to_string()))]);

        block_on(c.dispatch(Action::OpenDetail { url: "/propiedad/3/".to_string() }));

        let ops = c.page.ops();
        assert_eq!(ops.len(), 2);
        let error = markup::alert(AlertKind::Danger, &UiConfig::default().texts.property_error);
        assert_eq!(ops[1], Op::Content(Region::PropertyDetail, error));
        assert!(!ops.contains(&Op::Show(Dialog::Property)));
    }

    #[test]
    fn test_stale_detail_does_not_overwrite_newer() {
        let c = controller(FakePage::default(), vec![html(200, "<div>old</div>"), html(200, "<div>new</div>")]);

        let old = c.dispatch(Action::OpenDetail { url: "/propiedad/1/".to_string() });
        let new = c.dispatch(Action::OpenDetail { url: "/propiedad/2/".to_string() });
        block_on(old);
        block_on(new);

        let contents: Vec<_> = c
            .page
            .ops()
            .into_iter()
            .filter_map(|op| match op {
                Op::Content(_, html) if !html.contains("spinner") => Some(html),
                _ => None,
            })
            .collect();
        assert_eq!(contents, vec!["<div>new</div>".to_string()]);
    }

    #[test]
    fn test_contact_form_shown() {
        let c = controller(FakePage::default(), vec![html(200, "<form id=\"contactForm\"></form>")]);

        block_on(c.dispatch(Action::OpenContactForm { url: "/contact-form/3/".to_string() }));

        let ops = c.page.ops();
        assert_eq!(ops.len(), 3);
        assert_eq!(
            ops[1],
            Op::Content(Region::ContactContent, "<form id=\"contactForm\"></form>".to_string())
        );
        assert_eq!(ops[2], Op::Show(Dialog::Contact));
    }

    #[test]
    fn test_contact_form_redirect_and_denial() {
        let c = controller(
            FakePage::default(),
            vec![
                json(200, r#"{"success": false, "redirect": "/"}"#),
                json(200, r#"{"success": false}"#),
            ],
        );

        block_on(c.dispatch(Action::OpenContactForm { url: "/c/".to_string() }));
        assert_eq!(c.page.ops().last(), Some(&Op::Navigate("/".to_string())));

        block_on(c.dispatch(Action::OpenContactForm { url: "/c/".to_string() }));
        let denied = markup::alert(AlertKind::Warning, &UiConfig::default().texts.contact_denied);
        assert_eq!(c.page.ops().last(), Some(&Op::Content(Region::ContactContent, denied)));
    }

    #[test]
    fn test_submit_form_without_action_still_posts() {
        let c = controller(FakePage::default(), vec![json(200, r#"{"success": true}"#)]);
        let target = FakeTarget::inside("#contactForm", FakeNode::new("form"));

        let resolved = resolve_submit(&target, c.config()).unwrap();
        block_on(c.accept(resolved).unwrap());

        let sent = c.transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::Post);
        assert_eq!(sent[0].url, "");
        assert_eq!(c.page.ops()[0], Op::Hide(Dialog::Contact));
    }

    #[test]
    fn test_submit_success_hides_modal_and_banner_expires() {
        let c = controller(
            FakePage::default(),
            vec![json(200, r#"{"success": true, "message": "Enviado.", "email_sent": true}"#)],
        );

        block_on(c.dispatch(contact_form()));

        let title = UiConfig::default().texts.sent_title;
        assert_eq!(
            c.page.ops(),
            vec![
                Op::Hide(Dialog::Contact),
                Op::Banner(format!("{} Enviado.", title), None),
                Op::Sleep(5000),
                Op::Dismiss(1),
            ]
        );
        assert_eq!(c.transport.requests()[0].form.as_deref(), Some("mensaje=Hola"));
    }

    #[test]
    fn test_submit_success_warns_when_email_not_sent() {
        let c = controller(FakePage::default(), vec![json(200, r#"{"success": true, "email_sent": false}"#)]);

        block_on(c.dispatch(contact_form()));

        let texts = UiConfig::default().texts;
        assert!(c.page.ops().contains(&Op::Banner(
            format!("{} {}", texts.sent_title, texts.sent_message),
            Some(texts.email_not_sent.clone()),
        )));
    }

    #[test]
    fn test_submit_field_errors_keep_modal_open() {
        let c = controller(
            FakePage::with_fields(vec!["email", "mensaje"]),
            vec![json(
                400,
                r#"{
                    "success": false,
                    "message": "Por favor corrige los errores del formulario.",
                    "errors": {
                        "email": ["Enter a valid email address."],
                        "mensaje": ["This field is required.", "Too short."],
                        "telefono": ["Unknown field."],
                        "__all__": ["Try again later."]
                    }
                }"#,
            )],
        );

        block_on(c.dispatch(contact_form()));

        let ops = c.page.ops();
        assert_eq!(ops[0], Op::ClearErrors);
        assert!(ops.contains(&Op::FieldErrors(
            "email".to_string(),
            vec!["Enter a valid email address.".to_string()]
        )));
        assert!(ops.contains(&Op::FieldErrors(
            "mensaje".to_string(),
            vec!["This field is required.".to_string(), "Too short.".to_string()]
        )));
        assert_eq!(
            ops.last(),
            Some(&Op::FormMessage(
                "Por favor corrige los errores del formulario.".to_string(),
                vec!["Try again later.".to_string(), "Unknown field.".to_string()],
            ))
        );
        assert!(!ops.contains(&Op::Hide(Dialog::Contact)));
    }

    #[test]
    fn test_submit_network_failure_shows_general_error() {
        let c = controller(FakePage::default(), vec![Err(UiError::Network("offline".to_string()))]);

        block_on(c.dispatch(contact_form()));

        let texts = UiConfig::default().texts;
        assert_eq!(c.page.ops(), vec![Op::FormMessage(texts.submit_error, vec![])]);
    }
}
