use crate::config::Locale;

/// User-facing strings for the popup.
#[derive(Debug)]
pub struct Messages {
    pub title: &'static str,
    pub comments: &'static str,
    pub reposts: &'static str,
    pub likes: &'static str,
    pub views: &'static str,
    pub posts: &'static str,
    pub loading: &'static str,
    pub no_posts: &'static str,
    pub unsupported_page: &'static str,
    pub retry: &'static str,
    pub error_prefix: &'static str,
    pub unexpected_prefix: &'static str,
    pub no_active_tab: &'static str,
    pub help: &'static str,
}

const EN: Messages = Messages {
    title: "Post statistics",
    comments: "Comments",
    reposts: "Reposts",
    likes: "Likes",
    views: "Views",
    posts: "Posts",
    loading: "Collecting data...",
    no_posts: "No posts found",
    unsupported_page: "This extension only works on X (Twitter) pages",
    retry: "Failed to get data. Try reloading the page.",
    error_prefix: "Error",
    unexpected_prefix: "An error occurred",
    no_active_tab: "No active tab found",
    help: "↑/↓ scroll | q quit",
};

const RU: Messages = Messages {
    title: "Статистика постов",
    comments: "Комментарии",
    reposts: "Репосты",
    likes: "Лайки",
    views: "Просмотры",
    posts: "Посты",
    loading: "Сбор данных...",
    no_posts: "Посты не найдены",
    unsupported_page: "Это расширение работает только на страницах X (Twitter)",
    retry: "Произошла ошибка при получении данных. Попробуйте обновить страницу.",
    error_prefix: "Ошибка",
    unexpected_prefix: "Произошла ошибка",
    no_active_tab: "Активная вкладка не найдена",
    help: "↑/↓ прокрутка | q выход",
};

pub fn messages(locale: Locale) -> &'static Messages {
    match locale {
        Locale::En => &EN,
        Locale::Ru => &RU,
    }
}
