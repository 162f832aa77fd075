/// Claves de almacenamiento local
pub const STORAGE_KEY_USER: &str = "revolline_user";

// Mensajes para la UI (la tienda es en ruso; los errores del backend ya llegan en ruso)
pub const MSG_NETWORK_ERROR: &str = "Не удалось связаться с сервером. Попробуйте позже.";
pub const MSG_INVALID_CREDENTIALS: &str = "Неверный email или пароль";
pub const MSG_LOGIN_REQUIRED: &str = "Войдите в аккаунт, чтобы продолжить.";
pub const MSG_CART_LOAD_FAILED: &str = "Не удалось загрузить корзину";
pub const MSG_CART_UPDATE_FAILED: &str = "Не удалось обновить количество. Загружаю актуальные данные.";
pub const MSG_CART_REMOVE_FAILED: &str = "Не удалось удалить товар. Попробуйте снова.";
pub const MSG_CART_CLEAR_FAILED: &str = "Не удалось очистить корзину полностью.";
pub const MSG_PROMO_EMPTY: &str = "Введите промокод";
pub const MSG_PROMO_NO_SELECTION: &str = "Выберите товары, к которым хотите применить промокод";
pub const MSG_PROMO_NOT_FOUND: &str = "Промокод не найден";
pub const MSG_PROMO_CHECK_FAILED: &str = "Ошибка при проверке промокода";
pub const MSG_FAVORITES_LOAD_FAILED: &str = "Не удалось загрузить избранное";
pub const MSG_FAVORITES_REMOVE_FAILED: &str = "Не удалось удалить из избранного";
pub const MSG_FAVORITES_CLEAR_FAILED: &str = "Не удалось очистить избранное";
pub const MSG_CART_ADD_FAILED: &str = "Ошибка добавления в корзину";
pub const MSG_ORDERS_LOAD_FAILED: &str = "Не удалось загрузить заказы";
pub const MSG_PASSWORDS_MISMATCH: &str = "Пароли не совпадают";
pub const MSG_SHIPPING_ADDRESS_REQUIRED: &str = "Укажите адрес доставки";
pub const MSG_PASSWORD_TOO_SHORT: &str = "Пароль должен содержать не менее 8 символов.";
pub const MSG_RESET_LINK_INCOMPLETE: &str = "Параметры ссылки отсутствуют.";
pub const MSG_RESET_LINK_INVALID: &str = "Ссылка недействительна или устарела.";
pub const MSG_ACTIVATION_FAILED: &str = "Ссылка недействительна или устарела. Попробуйте зарегистрироваться заново.";
pub const MSG_EMAIL_REQUIRED: &str = "Введите email";
pub const MSG_PROFILE_SAVED: &str = "Данные успешно обновлены.";
pub const MSG_PASSWORD_CHANGED: &str = "Пароль успешно изменён.";

/// Longitud mínima de contraseña que valida el formulario de reset
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Mensaje mínimo de promo (`Минимальная сумма для промокода: 1500 ₽`)
pub fn promo_min_price_message(min_price: f64) -> String {
    format!("Минимальная сумма для промокода: {} ₽", min_price)
}
