use tracing::{debug, info};

use super::error_handling::BoardError;
use super::list_store::ListStore;
use super::notifications::Notifier;
use super::validation::InputValidator;
use crate::domain::TodoItem;
use crate::repository::todo_repository::TodoRepository;

/// The item being edited. Cannot exist without an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTarget {
    id: String,
    draft: String,
}

impl EditTarget {
    pub fn new(id: impl Into<String>, draft: impl Into<String>) -> Result<Self, BoardError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(BoardError::validation(
                "id",
                "Cannot edit an item without an identifier",
            ));
        }
        Ok(Self {
            id,
            draft: draft.into(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    Create,
    Edit(EditTarget),
}

impl EditMode {
    pub fn is_edit(&self) -> bool {
        matches!(self, EditMode::Edit(_))
    }

    pub fn target(&self) -> Option<&EditTarget> {
        match self {
            EditMode::Edit(target) => Some(target),
            EditMode::Create => None,
        }
    }
}

/// State and handlers of the todo view.
///
/// Every successful mutation is followed by a full refetch; nothing is
/// inserted into the list locally.
pub struct TodoController {
    todos: TodoRepository,
    store: ListStore<TodoItem>,
    mode: EditMode,
    input: String,
    notifier: Notifier,
}

impl TodoController {
    pub fn new(todos: TodoRepository) -> Self {
        Self {
            todos,
            store: ListStore::new(),
            mode: EditMode::Create,
            input: String::new(),
            notifier: Notifier::new(),
        }
    }

    pub fn items(&self) -> &[TodoItem] {
        self.store.items()
    }

    pub fn store(&self) -> &ListStore<TodoItem> {
        &self.store
    }

    pub fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// The add input is disabled for as long as an edit is open.
    pub fn is_input_enabled(&self) -> bool {
        !self.mode.is_edit()
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut Notifier {
        &mut self.notifier
    }

    /// Returns `false` (and changes nothing) while the input is disabled.
    pub fn set_input(&mut self, text: impl Into<String>) -> bool {
        if !self.is_input_enabled() {
            return false;
        }
        self.input = text.into();
        true
    }

    /// Returns `false` when nothing is being edited.
    pub fn set_draft(&mut self, text: impl Into<String>) -> bool {
        match &mut self.mode {
            EditMode::Edit(target) => {
                target.draft = text.into();
                true
            }
            EditMode::Create => false,
        }
    }

    pub async fn refresh(&mut self) -> Result<(), BoardError> {
        let todos = &self.todos;
        match self.store.refresh(|| todos.list()).await {
            Ok(items) => {
                debug!(count = items.len(), "Todos refreshed");
                Ok(())
            }
            Err(e) => {
                self.notifier.error("fetch todos", &e, "Failed to fetch todos");
                Err(e)
            }
        }
    }

    /// Create a todo from the add input. Blank input sends nothing.
    pub async fn submit_add(&mut self) -> Result<(), BoardError> {
        if self.mode.is_edit() {
            return Err(BoardError::validation(
                "todoText",
                "Finish or cancel the current edit first",
            ));
        }
        let text = InputValidator::require_text("todoText", &self.input, "Todo text cannot be empty")?;

        if let Err(e) = self.todos.create(&text).await {
            self.notifier.error("create todo", &e, "Submit failed");
            return Err(e);
        }

        info!(todo_text = %text, "Todo created");
        self.notifier.success("Todo added successfully");
        self.input.clear();
        // refresh failures are already surfaced as notices
        let _ = self.refresh().await;
        Ok(())
    }

    /// Switch to `Edit` for `item`, capturing its id and text as the draft.
    pub fn begin_edit(&mut self, item: &TodoItem) -> Result<(), BoardError> {
        let target = EditTarget::new(item.id.clone(), item.todo_text.clone())?;
        self.input = item.todo_text.clone();
        self.mode = EditMode::Edit(target);
        Ok(())
    }

    /// [`begin_edit`](Self::begin_edit) for an item of the current list.
    pub fn begin_edit_by_id(&mut self, id: &str) -> Result<(), BoardError> {
        let item = self
            .store
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| BoardError::validation("id", format!("No todo with id {}", id)))?;
        self.begin_edit(&item)
    }

    /// Send the draft. Stays in `Edit` when the update fails.
    pub async fn submit_edit(&mut self) -> Result<(), BoardError> {
        let target = match &self.mode {
            EditMode::Edit(target) => target.clone(),
            EditMode::Create => {
                return Err(BoardError::validation("mode", "Nothing is being edited"));
            }
        };
        let text =
            InputValidator::require_text("todoText", target.draft(), "Todo text cannot be empty")?;

        if let Err(e) = self.todos.update(target.id(), &text).await {
            self.notifier.error("update todo", &e, "Edit failed");
            return Err(e);
        }

        info!(id = %target.id(), "Todo updated");
        self.reset_to_create();
        let _ = self.refresh().await;
        self.notifier.success("Todo updated successfully");
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.reset_to_create();
    }

    /// Delete is only allowed in `Create` mode.
    pub async fn delete(&mut self, id: &str) -> Result<(), BoardError> {
        if self.mode.is_edit() {
            let error = BoardError::validation(
                "mode",
                "Finish or cancel the current edit before deleting",
            );
            self.notifier.error("delete todo", &error, "Delete failed");
            return Err(error);
        }

        if let Err(e) = self.todos.delete(id).await {
            self.notifier.error("delete todo", &e, "Delete failed");
            return Err(e);
        }

        info!(id = %id, "Todo deleted");
        self.reset_to_create();
        let _ = self.refresh().await;
        self.notifier.success("Todo deleted successfully");
        Ok(())
    }

    fn reset_to_create(&mut self) {
        self.mode = EditMode::Create;
        self.input.clear();
    }
}
