use std::sync::Arc;

use super::blacklist::{matching_pattern, Blacklist};
use super::list_store::ListStore;
use crate::application::errors::StorageError;
use crate::domain::entities::{Category, Command, Outcome};
use crate::domain::traits::{Chooser, ThreadRngChooser};

/// Category argument that lists every category at once
pub const ALL_CATEGORIES: &str = "全部";

/// Runs commands against the restaurant lists and the blacklist.
///
/// Holds no list state of its own: each command reloads what it needs from
/// storage and writes mutations straight back, under the matching lock.
pub struct CommandInterpreter {
    lists: Arc<ListStore>,
    blacklist: Arc<Blacklist>,
    chooser: Arc<dyn Chooser>,
}

impl CommandInterpreter {
    pub fn new(lists: Arc<ListStore>, blacklist: Arc<Blacklist>) -> Self {
        Self {
            lists,
            blacklist,
            chooser: Arc::new(ThreadRngChooser),
        }
    }

    pub fn with_chooser(mut self, chooser: Arc<dyn Chooser>) -> Self {
        self.chooser = chooser;
        self
    }

    /// Handle one command. Storage failures become a reply, never an error.
    pub async fn handle(&self, command: &Command) -> Outcome {
        tracing::debug!("Handling {:?} {:?}", command.verb(), command.args());

        let result = match command {
            Command::ShowMenu => Ok(Outcome::Menu),
            Command::ListCategory { category } => self.list_category(category).await,
            Command::PickRandom { category } => self.pick_random(category).await,
            Command::AddEntry { category, name } => self.add_entry(category, name).await,
            Command::RemoveEntry { category, name } => self.remove_entry(category, name).await,
            Command::AddBlacklist { name } => self.add_blacklist(name).await,
            Command::RemoveBlacklist { name } => self.remove_blacklist(name).await,
            Command::ListBlacklist => self.list_blacklist().await,
            Command::Malformed(verb) => Ok(Outcome::Usage(*verb)),
        };

        match result {
            Ok(outcome) => {
                if outcome.is_mutation() {
                    tracing::info!("{:?} applied: {:?}", command.verb(), outcome);
                }
                outcome
            }
            Err(e) => {
                tracing::error!(
                    "{:?} failed (retryable: {}): {}",
                    command.verb(),
                    e.is_retryable(),
                    e
                );
                Outcome::StorageUnavailable
            }
        }
    }

    async fn list_category(&self, category: &str) -> Result<Outcome, StorageError> {
        if category == ALL_CATEGORIES {
            let lists = self.lists.load().await?;
            let mut populated = Vec::new();
            let mut empty = Vec::new();
            for (category, entries) in lists {
                if entries.is_empty() {
                    empty.push(category);
                } else {
                    populated.push((category, entries));
                }
            }
            return Ok(Outcome::AllLists { populated, empty });
        }

        let Some(category) = Category::from_label(category) else {
            return Ok(Outcome::InvalidOption);
        };

        let entries = self.lists.load_category(category).await?;
        if entries.is_empty() {
            Ok(Outcome::CategoryEmpty(category))
        } else {
            Ok(Outcome::CategoryList { category, entries })
        }
    }

    async fn pick_random(&self, category: &str) -> Result<Outcome, StorageError> {
        let Some(category) = Category::from_label(category) else {
            return Ok(Outcome::InvalidOption);
        };

        let entries = self.lists.load_category(category).await?;
        if entries.is_empty() {
            return Ok(Outcome::CategoryEmpty(category));
        }

        let index = self.chooser.choose(entries.len()).min(entries.len() - 1);
        Ok(Outcome::Picked {
            category,
            name: entries[index].clone(),
        })
    }

    async fn add_entry(&self, category: &str, name: &str) -> Result<Outcome, StorageError> {
        let Some(category) = Category::from_label(category) else {
            return Ok(Outcome::InvalidCategory);
        };

        let _guard = self.lists.lock(category).await;
        let mut entries = self.lists.load_category(category).await?;
        let patterns = self.blacklist.load().await?;

        if let Some(pattern) = matching_pattern(&patterns, name) {
            tracing::info!("Rejected {} for {}: matches blacklist pattern {}", name, category, pattern);
            return Ok(Outcome::Blacklisted {
                name: name.to_string(),
            });
        }

        if entries.iter().any(|entry| entry == name) {
            return Ok(Outcome::AlreadyExists {
                category,
                name: name.to_string(),
            });
        }

        entries.push(name.to_string());
        self.lists.save(category, &entries).await?;
        Ok(Outcome::Added {
            category,
            name: name.to_string(),
        })
    }

    async fn remove_entry(&self, category: &str, name: &str) -> Result<Outcome, StorageError> {
        let Some(category) = Category::from_label(category) else {
            return Ok(Outcome::InvalidCategory);
        };

        let _guard = self.lists.lock(category).await;
        let mut entries = self.lists.load_category(category).await?;

        let Some(position) = entries.iter().position(|entry| entry == name) else {
            return Ok(Outcome::NotInCategory {
                category,
                name: name.to_string(),
            });
        };

        entries.remove(position);
        self.lists.save(category, &entries).await?;
        Ok(Outcome::Removed {
            category,
            name: name.to_string(),
        })
    }

    async fn add_blacklist(&self, name: &str) -> Result<Outcome, StorageError> {
        let _guard = self.blacklist.lock().await;
        let mut patterns = self.blacklist.load().await?;

        if patterns.iter().any(|pattern| pattern == name) {
            return Ok(Outcome::BlacklistExists(name.to_string()));
        }

        patterns.push(name.to_string());
        self.blacklist.save(&patterns).await?;
        Ok(Outcome::BlacklistAdded(name.to_string()))
    }

    async fn remove_blacklist(&self, name: &str) -> Result<Outcome, StorageError> {
        let _guard = self.blacklist.lock().await;
        let mut patterns = self.blacklist.load().await?;

        let Some(position) = patterns.iter().position(|pattern| pattern == name) else {
            return Ok(Outcome::NotInBlacklist(name.to_string()));
        };

        patterns.remove(position);
        self.blacklist.save(&patterns).await?;
        Ok(Outcome::BlacklistRemoved(name.to_string()))
    }

    async fn list_blacklist(&self) -> Result<Outcome, StorageError> {
        let patterns = self.blacklist.load().await?;
        if patterns.is_empty() {
            Ok(Outcome::BlacklistEmpty)
        } else {
            Ok(Outcome::BlacklistListing(patterns))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Verb;
    use crate::domain::traits::ListBackend;
    use crate::infrastructure::storage::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Always picks the configured index
    struct FixedChooser(AtomicUsize);

    impl Chooser for FixedChooser {
        fn choose(&self, _len: usize) -> usize {
            self.0.load(Ordering::SeqCst)
        }
    }

    fn interpreter(backend: Arc<MemoryStore>) -> CommandInterpreter {
        CommandInterpreter::new(
            Arc::new(ListStore::new(backend.clone())),
            Arc::new(Blacklist::new(backend)),
        )
    }

    fn add(category: &str, name: &str) -> Command {
        Command::AddEntry {
            category: category.to_string(),
            name: name.to_string(),
        }
    }

    fn list(category: &str) -> Command {
        Command::ListCategory {
            category: category.to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_then_list() {
        let interp = interpreter(Arc::new(MemoryStore::new()));

        let outcome = interp.handle(&add("外送", "八方雲集")).await;
        assert_eq!(
            outcome,
            Outcome::Added {
                category: Category::Delivery,
                name: "八方雲集".to_string()
            }
        );

        assert_eq!(
            interp.handle(&list("外送")).await,
            Outcome::CategoryList {
                category: Category::Delivery,
                entries: vec!["八方雲集".to_string()]
            }
        );
    }

    #[tokio::test]
    async fn test_duplicate_add_leaves_list_unchanged() {
        let backend = Arc::new(MemoryStore::new());
        let interp = interpreter(backend.clone());

        interp.handle(&add("吃點好的", "鼎泰豐")).await;
        let outcome = interp.handle(&add("吃點好的", "鼎泰豐")).await;

        assert_eq!(
            outcome,
            Outcome::AlreadyExists {
                category: Category::FineDining,
                name: "鼎泰豐".to_string()
            }
        );
        assert_eq!(backend.read("great").await.unwrap(), Some(vec!["鼎泰豐".to_string()]));
    }

    #[tokio::test]
    async fn test_blacklist_checked_before_existence() {
        let backend = Arc::new(MemoryStore::new());
        backend.write("easy", &["麥當勞".to_string()]).await.unwrap();
        backend.write("blacklist", &["麥當勞".to_string()]).await.unwrap();
        let interp = interpreter(backend);

        assert_eq!(
            interp.handle(&add("簡單出去吃", "麥當勞")).await,
            Outcome::Blacklisted {
                name: "麥當勞".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_unknown_category_messages() {
        let interp = interpreter(Arc::new(MemoryStore::new()));

        assert_eq!(interp.handle(&add("宵夜", "鹽酥雞")).await, Outcome::InvalidCategory);
        assert_eq!(
            interp
                .handle(&Command::RemoveEntry {
                    category: "宵夜".to_string(),
                    name: "鹽酥雞".to_string()
                })
                .await,
            Outcome::InvalidCategory
        );
        assert_eq!(interp.handle(&list("宵夜")).await, Outcome::InvalidOption);
        assert_eq!(
            interp
                .handle(&Command::PickRandom {
                    category: "宵夜".to_string()
                })
                .await,
            Outcome::InvalidOption
        );
    }

    #[tokio::test]
    async fn test_pick_random_uses_chooser() {
        let backend = Arc::new(MemoryStore::new());
        backend
            .write("drink", &["五十嵐".to_string(), "可不可".to_string(), "清心".to_string()])
            .await
            .unwrap();
        let interp = interpreter(backend).with_chooser(Arc::new(FixedChooser(AtomicUsize::new(2))));

        assert_eq!(
            interp
                .handle(&Command::PickRandom {
                    category: "喝點飲料".to_string()
                })
                .await,
            Outcome::Picked {
                category: Category::Drinks,
                name: "清心".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_pick_random_empty_category() {
        let interp = interpreter(Arc::new(MemoryStore::new()))
            .with_chooser(Arc::new(FixedChooser(AtomicUsize::new(0))));

        for _ in 0..5 {
            assert_eq!(
                interp
                    .handle(&Command::PickRandom {
                        category: "外送".to_string()
                    })
                    .await,
                Outcome::CategoryEmpty(Category::Delivery)
            );
        }
    }

    #[tokio::test]
    async fn test_list_all_partitions_categories() {
        let backend = Arc::new(MemoryStore::new());
        backend.write("delivery", &["八方雲集".to_string()]).await.unwrap();
        backend.write("drink", &["五十嵐".to_string()]).await.unwrap();
        let interp = interpreter(backend);

        assert_eq!(
            interp.handle(&list(ALL_CATEGORIES)).await,
            Outcome::AllLists {
                populated: vec![
                    (Category::Delivery, vec!["八方雲集".to_string()]),
                    (Category::Drinks, vec!["五十嵐".to_string()]),
                ],
                empty: vec![Category::EatOut, Category::FineDining],
            }
        );
    }

    #[tokio::test]
    async fn test_remove_entry() {
        let backend = Arc::new(MemoryStore::new());
        backend
            .write("easy", &["麥當勞".to_string(), "摩斯漢堡".to_string()])
            .await
            .unwrap();
        let interp = interpreter(backend.clone());

        let remove = |name: &str| Command::RemoveEntry {
            category: "簡單出去吃".to_string(),
            name: name.to_string(),
        };

        assert_eq!(
            interp.handle(&remove("麥當勞")).await,
            Outcome::Removed {
                category: Category::EatOut,
                name: "麥當勞".to_string()
            }
        );
        assert_eq!(
            interp.handle(&remove("麥當勞")).await,
            Outcome::NotInCategory {
                category: Category::EatOut,
                name: "麥當勞".to_string()
            }
        );
        assert_eq!(backend.read("easy").await.unwrap(), Some(vec!["摩斯漢堡".to_string()]));
    }

    #[tokio::test]
    async fn test_blacklist_lifecycle() {
        let interp = interpreter(Arc::new(MemoryStore::new()));
        let add = Command::AddBlacklist { name: "麥當勞".to_string() };
        let remove = Command::RemoveBlacklist { name: "麥當勞".to_string() };

        assert_eq!(interp.handle(&Command::ListBlacklist).await, Outcome::BlacklistEmpty);
        assert_eq!(interp.handle(&add).await, Outcome::BlacklistAdded("麥當勞".to_string()));
        assert_eq!(interp.handle(&add).await, Outcome::BlacklistExists("麥當勞".to_string()));
        assert_eq!(
            interp.handle(&Command::ListBlacklist).await,
            Outcome::BlacklistListing(vec!["麥當勞".to_string()])
        );
        assert_eq!(interp.handle(&remove).await, Outcome::BlacklistRemoved("麥當勞".to_string()));
        assert_eq!(interp.handle(&remove).await, Outcome::NotInBlacklist("麥當勞".to_string()));
    }

    #[tokio::test]
    async fn test_reads_through_to_storage() {
        let backend = Arc::new(MemoryStore::new());
        let interp = interpreter(backend.clone());

        assert_eq!(interp.handle(&list("外送")).await, Outcome::CategoryEmpty(Category::Delivery));
        // edited behind the interpreter's back
        backend.write("delivery", &["Subway".to_string()]).await.unwrap();
        assert_eq!(
            interp.handle(&list("外送")).await,
            Outcome::CategoryList {
                category: Category::Delivery,
                entries: vec!["Subway".to_string()]
            }
        );
    }

    #[tokio::test]
    async fn test_menu_and_usage() {
        let interp = interpreter(Arc::new(MemoryStore::new()));
        assert_eq!(interp.handle(&Command::ShowMenu).await, Outcome::Menu);
        assert_eq!(
            interp.handle(&Command::Malformed(Verb::RemoveEntry)).await,
            Outcome::Usage(Verb::RemoveEntry)
        );
    }

    #[tokio::test]
    async fn test_concurrent_adds_to_one_category_all_land() {
        let backend = Arc::new(MemoryStore::new());
        let interp = Arc::new(interpreter(backend.clone()));

        let mut handles = Vec::new();
        for i in 0..20 {
            let interp = interp.clone();
            handles.push(tokio::spawn(async move {
                interp.handle(&add("外送", &format!("店{}", i))).await
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().is_mutation());
        }

        let stored = backend.read("delivery").await.unwrap().unwrap();
        assert_eq!(stored.len(), 20);
    }

    #[tokio::test]
    async fn test_concurrent_blacklist_adds_all_land() {
        let backend = Arc::new(MemoryStore::new());
        let interp = Arc::new(interpreter(backend.clone()));

        let mut handles = Vec::new();
        for i in 0..20 {
            let interp = interp.clone();
            handles.push(tokio::spawn(async move {
                interp
                    .handle(&Command::AddBlacklist { name: format!("關鍵字{}", i) })
                    .await
            }));
        }
        for handle in handles {
            assert!(matches!(handle.await.unwrap(), Outcome::BlacklistAdded(_)));
        }

        let stored = backend.read("blacklist").await.unwrap().unwrap();
        assert_eq!(stored.len(), 20);
    }
}
